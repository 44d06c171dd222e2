//! Name completion and near-miss suggestions for the console line editor.

use keel_vars::VarStore;

/// Suggests a similar registered name using fuzzy matching.
pub fn suggest_name(vars: &VarStore, name: &str) -> Option<String> {
	vars.iter()
		.map(|v| v.name().to_string())
		.min_by_key(|k| strsim::levenshtein(name, k))
		.filter(|k| strsim::levenshtein(name, k) <= 3)
}

/// Registered names starting with `prefix`, case-insensitively, in
/// registration order.
pub fn complete_name(vars: &VarStore, prefix: &str) -> Vec<String> {
	let prefix = prefix.to_ascii_lowercase();
	vars.iter()
		.map(|v| v.name())
		.filter(|name| name.to_ascii_lowercase().starts_with(&prefix))
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use keel_vars::VarFlags;

	fn store() -> VarStore {
		let mut vars = VarStore::new();
		for name in ["r_gamma", "r_mode", "s_volume"] {
			vars.host_register(name, "0", VarFlags::empty()).unwrap();
		}
		vars
	}

	#[test]
	fn test_suggests_close_names_only() {
		let vars = store();
		assert_eq!(suggest_name(&vars, "r_gama").as_deref(), Some("r_gamma"));
		assert_eq!(suggest_name(&vars, "completely_off"), None);
	}

	#[test]
	fn test_completion_is_prefix_based() {
		let vars = store();
		assert_eq!(complete_name(&vars, "R_"), vec!["r_gamma", "r_mode"]);
		assert!(complete_name(&vars, "x").is_empty());
	}
}
