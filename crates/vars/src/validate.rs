//! Numeric range enforcement for candidate values.
//!
//! Validation parameters are attached to a variable once and applied on
//! every subsequent resolution. Violations are never errors: the value is
//! corrected and a warning is emitted per violated constraint.

/// Range constraints attached to a numeric variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validation {
	pub min: f32,
	pub max: f32,
	/// Truncate fractional values to whole numbers.
	pub integral: bool,
}

/// Checks `candidate` against `validation`, returning the corrected text.
///
/// `None` means the candidate passed unchanged (including the unconfigured
/// passthrough case). A candidate that does not parse as a finite number is
/// replaced by `fallback` before the range is applied.
pub(crate) fn check(
	validation: Option<&Validation>,
	name: &str,
	candidate: &str,
	fallback: &str,
) -> Option<String> {
	let v = validation?;
	let mut value = match candidate.trim().parse::<f32>() {
		Ok(n) if n.is_finite() => n,
		_ => {
			let substitute = fallback.trim().parse::<f32>().unwrap_or(0.0);
			tracing::warn!(
				domain = "vars",
				name,
				candidate,
				substitute,
				"value is not numeric; substituting",
			);
			substitute
		}
	};

	if value < v.min {
		tracing::warn!(domain = "vars", name, value, min = v.min, "value below minimum; clamped");
		value = v.min;
	} else if value > v.max {
		tracing::warn!(domain = "vars", name, value, max = v.max, "value above maximum; clamped");
		value = v.max;
	}
	if v.integral && value.fract() != 0.0 {
		tracing::warn!(domain = "vars", name, value, "value must be integral; truncated");
		value = value.trunc();
	}

	let text = format_numeric(value);
	(text != candidate).then_some(text)
}

/// Minimal textual form: integer format for whole values, shortest float
/// form otherwise.
pub(crate) fn format_numeric(value: f32) -> String {
	if value.fract() == 0.0 && value.abs() < i64::MAX as f32 {
		format!("{}", value as i64)
	} else {
		format!("{value}")
	}
}
