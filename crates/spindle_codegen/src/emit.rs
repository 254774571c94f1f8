//! Rendering injector functions.
//!
//! The emitted function binds the injector's parameters to the given slots,
//! assigns each call's result to a local named after its call index (`v0`,
//! `v1`, ...), checks `err` right after every fallible call, and returns the
//! last local (or the parameter holding the result, when the plan is empty).

use spindle_solver::{Call, Plan, SlotSource};
use spindle_types::injector::InjectorSpec;

use crate::error::EmitError;
use crate::imports::{ImportTable, referenced_units};
use crate::zero::zero_value;

/// Renders `spec` using `plan` and a fresh import table.
///
/// # Errors
///
/// See [`emit_with`].
pub fn emit(spec: &InjectorSpec, plan: &Plan) -> Result<String, EmitError> {
    let imports = ImportTable::for_injector(spec, plan);
    emit_with(spec, plan, &imports)
}

/// Renders `spec` using `plan`, qualifying cross-unit names through
/// `imports`.
///
/// # Errors
///
/// - [`EmitError::Signature`] if a fallible call is scheduled but `spec`
///   cannot return an error.
/// - [`EmitError::PlanMismatch`] if `plan` was not solved for `spec`, or a
///   parameter name collides with `err`, a `v{n}` local or an import alias.
/// - [`EmitError::MissingImport`] if `imports` lacks a referenced unit.
pub fn emit_with(
    spec: &InjectorSpec,
    plan: &Plan,
    imports: &ImportTable,
) -> Result<String, EmitError> {
    let result = check(spec, plan, imports)?;

    let mut out = String::new();
    signature(&mut out, spec, imports);
    out.push_str(" {\n");

    for (index, call) in plan.calls().iter().enumerate() {
        let expr = invocation(call, plan, spec, imports);
        if call.may_fail {
            out.push_str(&format!("\tv{index}, err := {expr}\n"));
            out.push_str("\tif err != nil {\n");
            out.push_str(&format!(
                "\t\treturn {}, err\n",
                zero_value(spec.output(), imports)
            ));
            out.push_str("\t}\n");
        } else {
            out.push_str(&format!("\tv{index} := {expr}\n"));
        }
    }

    out.push_str("\treturn ");
    out.push_str(&result);
    if spec.returns_err() {
        out.push_str(", nil");
    }
    out.push_str("\n}\n");

    tracing::trace!(
        injector = spec.name(),
        calls = plan.len(),
        "emitted injector"
    );
    Ok(out)
}

/// Checks that every fallible call in `plan` can propagate its error
/// through `spec`.
///
/// # Errors
///
/// Returns [`EmitError::Signature`] naming the first fallible call's output
/// type if `spec` has no error result.
pub fn check_signature(spec: &InjectorSpec, plan: &Plan) -> Result<(), EmitError> {
    if spec.returns_err() {
        return Ok(());
    }
    match plan.calls().iter().find(|call| call.may_fail) {
        Some(call) => Err(EmitError::Signature {
            injector: spec.name().to_string(),
            ty: call.output.clone(),
        }),
        None => Ok(()),
    }
}

/// Validates `plan` against `spec` and returns the result expression.
fn check(spec: &InjectorSpec, plan: &Plan, imports: &ImportTable) -> Result<String, EmitError> {
    let mismatch = |detail: String| EmitError::PlanMismatch {
        injector: spec.name().to_string(),
        detail,
    };

    if plan.given_len() != spec.params().len() {
        return Err(mismatch(format!(
            "plan has {} given slots, injector has {} parameters",
            plan.given_len(),
            spec.params().len()
        )));
    }

    if let Some(param) = spec.params().iter().find(|param| is_generated_local(&param.name)) {
        return Err(mismatch(format!(
            "parameter {} collides with a generated local",
            param.name
        )));
    }
    if let Some(param) = spec
        .params()
        .iter()
        .find(|param| imports.iter().any(|(_, alias)| alias == &*param.name))
    {
        return Err(mismatch(format!(
            "parameter {} shadows an import alias",
            param.name
        )));
    }

    check_signature(spec, plan)?;

    if let Some(unit) = referenced_units(spec, plan)
        .into_iter()
        .find(|unit| !imports.covers(unit))
    {
        return Err(EmitError::MissingImport {
            injector: spec.name().to_string(),
            unit,
        });
    }

    match plan.calls().last() {
        Some(last) if last.output == *spec.output() => Ok(format!("v{}", plan.len() - 1)),
        Some(last) => Err(mismatch(format!(
            "last call produces {}, injector returns {}",
            last.output,
            spec.output()
        ))),
        None => spec
            .params()
            .iter()
            .find(|param| param.ty == *spec.output())
            .map(|param| param.name.to_string())
            .ok_or_else(|| mismatch(format!("no call or parameter produces {}", spec.output()))),
    }
}

/// `err` and `v0`, `v1`, ... are declared by the emitted body.
fn is_generated_local(name: &str) -> bool {
    name == "err"
        || name
            .strip_prefix('v')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Writes `func Name(a A, b B) (T, error)`.
fn signature(out: &mut String, spec: &InjectorSpec, imports: &ImportTable) {
    let params = spec
        .params()
        .iter()
        .map(|param| format!("{} {}", param.name, param.ty.render(imports)))
        .collect::<Vec<_>>()
        .join(", ");
    let output = spec.output().render(imports);

    out.push_str(&format!("func {}({params}) ", spec.name()));
    if spec.returns_err() {
        out.push_str(&format!("({output}, error)"));
    } else {
        out.push_str(&output);
    }
}

/// Renders `pkg0.NewFoo(a, v0)` for `call`.
fn invocation(call: &Call, plan: &Plan, spec: &InjectorSpec, imports: &ImportTable) -> String {
    let args = call
        .args
        .iter()
        .map(|&slot| match plan.source(slot) {
            SlotSource::Given(i) => spec.params()[i].name.to_string(),
            SlotSource::Call(j) => format!("v{j}"),
        })
        .collect::<Vec<_>>()
        .join(", ");

    match imports.alias(&call.provider.unit) {
        Some(alias) => format!("{alias}.{}({args})", call.provider.name),
        None => format!("{}({args})", call.provider.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_locals() {
        for name in ["err", "v0", "v12"] {
            assert!(is_generated_local(name), "{name}");
        }
        for name in ["v", "vx", "v1a", "errs", "cfg", "V0"] {
            assert!(!is_generated_local(name), "{name}");
        }
    }
}
