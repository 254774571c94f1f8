//! The generation pipeline.
//!
//! One [`Generator`] produces one output file for one unit. For every
//! [`Injector`] it merges the provider sets the injector uses, solves a plan
//! and checks the plan against the injector's signature. Once every plan is
//! known, a single [`ImportTable`] is built for the whole file and each
//! injector is rendered against it.
//!
//! # Isolation
//!
//! Catalogs are immutable, so injectors that use the same provider sets share
//! one merged catalog. Solving and rendering always start from fresh state:
//! slot numbering restarts at `v0` in every injector.

use std::sync::Arc;

use hashbrown::HashMap;
use spindle_catalog::{ProviderCatalog, ProviderSetSource, merge};
use spindle_codegen::{ImportTable, check_signature, emit_with};
use spindle_codegen::imports::referenced_units;
use spindle_solver::{Plan, solve};
use spindle_types::injector::InjectorSpec;
use spindle_types::provider::ProviderSetRef;
use spindle_types::unit::UnitPath;

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, InjectorError};

// ─────────────────────────────────────────────────────────────────────────────
// Injector
// ─────────────────────────────────────────────────────────────────────────────

/// A request to generate one injector function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injector {
    /// The function to generate.
    pub spec: InjectorSpec,
    /// Root provider sets the injector draws on.
    pub uses: Vec<ProviderSetRef>,
}

impl Injector {
    /// Creates an injector request.
    #[must_use]
    pub fn new(spec: InjectorSpec, uses: Vec<ProviderSetRef>) -> Self {
        Self { spec, uses }
    }

    fn fail(&self, source: impl Into<InjectorError>) -> GenerateError {
        GenerateError::Injector {
            name: self.spec.name().to_string(),
            pos: self.spec.pos().cloned(),
            source: source.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generator
// ─────────────────────────────────────────────────────────────────────────────

/// Generates the injector file of one unit.
///
/// The provider set source is typically a
/// [`ProviderSetCache`](spindle_catalog::ProviderSetCache) shared by
/// reference, so every unit is analysed once per run.
#[derive(Debug)]
pub struct Generator<S> {
    source: S,
    unit: UnitPath,
    config: GeneratorConfig,
}

impl<S: ProviderSetSource> Generator<S> {
    /// Creates a generator for code placed in `unit`.
    #[must_use]
    pub fn new(source: S, unit: UnitPath, config: GeneratorConfig) -> Self {
        Self {
            source,
            unit,
            config,
        }
    }

    /// Returns the unit generated code lives in.
    #[must_use]
    pub fn unit(&self) -> &UnitPath {
        &self.unit
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the provider set source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Merges, solves and validates a single injector.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Injector`] wrapping the merge, solve or
    /// signature failure.
    pub fn plan(&self, injector: &Injector) -> Result<Plan, GenerateError> {
        self.check_unit(injector)?;
        let catalog = merge(&self.source, &injector.uses).map_err(|err| injector.fail(err))?;
        self.plan_with(injector, &catalog)
    }

    /// Rejects injectors declared outside the generated unit, before any
    /// provider set is loaded for them.
    fn check_unit(&self, injector: &Injector) -> Result<(), GenerateError> {
        let declared = injector.spec.unit();
        if *declared == self.unit {
            return Ok(());
        }
        Err(injector.fail(InjectorError::ForeignUnit {
            declared: declared.clone(),
            generating: self.unit.clone(),
        }))
    }

    fn plan_with(&self, injector: &Injector, catalog: &ProviderCatalog) -> Result<Plan, GenerateError> {
        let spec = &injector.spec;
        let plan = solve(catalog, &spec.given(), spec.output()).map_err(|err| injector.fail(err))?;
        check_signature(spec, &plan).map_err(|err| injector.fail(err))?;
        Ok(plan)
    }

    /// Generates the file holding `injectors`, declared in `package`.
    ///
    /// Returns `Ok(None)` when there are no injectors. Injectors appear in
    /// the file in the order given.
    ///
    /// # Errors
    ///
    /// Returns the first injector's failure; no partial file is produced.
    pub fn generate(
        &self,
        package: &str,
        injectors: &[Injector],
    ) -> Result<Option<String>, GenerateError> {
        if injectors.is_empty() {
            return Ok(None);
        }
        let _span = tracing::info_span!("generate", unit = %self.unit, injectors = injectors.len())
            .entered();

        let mut catalogs: HashMap<&[ProviderSetRef], Arc<ProviderCatalog>> = HashMap::new();
        let mut plans = Vec::with_capacity(injectors.len());
        for injector in injectors {
            let _span = tracing::debug_span!("injector", name = injector.spec.name()).entered();
            self.check_unit(injector)?;

            let catalog = match catalogs.get(injector.uses.as_slice()) {
                Some(catalog) => Arc::clone(catalog),
                None => {
                    let merged = merge(&self.source, &injector.uses)
                        .map(Arc::new)
                        .map_err(|err| injector.fail(err))?;
                    catalogs.insert(injector.uses.as_slice(), Arc::clone(&merged));
                    merged
                }
            };
            plans.push(self.plan_with(injector, &catalog)?);
        }

        let imports = ImportTable::new(
            self.unit.clone(),
            self.config.alias_prefix(),
            injectors
                .iter()
                .zip(&plans)
                .flat_map(|(injector, plan)| referenced_units(&injector.spec, plan)),
        );

        let mut bodies = Vec::with_capacity(injectors.len());
        for (injector, plan) in injectors.iter().zip(&plans) {
            bodies.push(emit_with(&injector.spec, plan, &imports).map_err(|err| injector.fail(err))?);
        }

        tracing::info!(
            injectors = injectors.len(),
            catalogs = catalogs.len(),
            imports = imports.len(),
            "generated injector file"
        );
        Ok(Some(self.frame(package, &imports, &bodies)))
    }

    /// Wraps rendered injectors in banner, build constraint, package clause
    /// and import block. Import paths are written as quoted string literals.
    fn frame(&self, package: &str, imports: &ImportTable, bodies: &[String]) -> String {
        let mut out = String::new();
        out.push_str(self.config.banner());
        out.push_str("\n\n");
        if let Some(tag) = self.config.build_tag() {
            out.push_str(&format!("//go:build {tag}\n\n"));
        }
        out.push_str(&format!("package {package}\n\n"));

        if !imports.is_empty() {
            out.push_str("import (\n");
            for (unit, alias) in imports.iter() {
                out.push_str(&format!("\t{alias} {:?}\n", unit.as_str()));
            }
            out.push_str(")\n\n");
        }

        for (i, body) in bodies.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(body);
        }
        out
    }
}
