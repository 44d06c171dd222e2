use crate::{VarFlags, VarStore, WriteMode};

#[test]
fn test_creation_is_idempotent() {
	let mut store = VarStore::new();
	store.host_register("r_gamma", "1.4", VarFlags::empty()).unwrap();
	store.host_register("R_GAMMA", "1.4", VarFlags::empty()).unwrap();
	store
		.command_write("r_Gamma", "2.0", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();

	assert_eq!(store.len(), 1);
	assert_eq!(store.iter().count(), 1);
	// Case-preserving storage, case-insensitive lookup.
	assert_eq!(store.find("R_GAMMA").unwrap().name(), "r_gamma");
}

#[test]
fn test_tier_precedence() {
	let mut store = VarStore::new();
	store
		.host_register("g_speed", "320", VarFlags::MODIFIABLE)
		.unwrap();

	store
		.command_write("g_speed", "300", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	assert_eq!(store.get_string("g_speed"), "300");

	// Protected value wins over main.
	store.sandbox_write("g_speed", "400").unwrap();
	assert_eq!(store.get_string("g_speed"), "400");
	assert!(store.find("g_speed").unwrap().is_protected_value());

	// Both win over defaults.
	store.reset("g_speed", false).unwrap();
	assert_eq!(store.get_string("g_speed"), "320");
	assert!(!store.find("g_speed").unwrap().is_protected_value());
}

#[test]
fn test_latch_withholds_until_unlatch() {
	let mut store = VarStore::new();
	store.host_register("fs_game", "base", VarFlags::LATCH).unwrap();
	assert_eq!(store.get_string("fs_game"), "base");

	store
		.command_write("fs_game", "mod", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	let var = store.find("fs_game").unwrap();
	assert_eq!(var.current(), "base");
	assert_eq!(var.latched(), Some("mod"));
	// A pending-latch change is itself observable.
	assert_eq!(var.modification_count(), 1);

	// Re-registration at restart commits the pending value.
	store.host_register("fs_game", "base", VarFlags::LATCH).unwrap();
	let var = store.find("fs_game").unwrap();
	assert_eq!(var.current(), "mod");
	assert_eq!(var.latched(), None);
	assert_eq!(var.modification_count(), 2);
}

#[test]
fn test_latch_equal_value_commits_immediately() {
	let mut store = VarStore::new();
	store.host_register("fs_game", "base", VarFlags::LATCH).unwrap();
	store
		.command_write("fs_game", "base", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	let var = store.find("fs_game").unwrap();
	assert_eq!(var.current(), "base");
	assert_eq!(var.latched(), None);
}

#[test]
fn test_gamma_scenario_counts_modifications() {
	let mut store = VarStore::new();
	store.host_register("r_gamma", "1.4", VarFlags::empty()).unwrap();
	assert_eq!(store.find("r_gamma").unwrap().modification_count(), 0);

	store
		.command_write("r_gamma", "2.0", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	assert_eq!(store.get_float("r_gamma"), 2.0);
	assert_eq!(store.find("r_gamma").unwrap().modification_count(), 1);

	store.reset("r_gamma", false).unwrap();
	let var = store.find("r_gamma").unwrap();
	assert_eq!(var.current(), "1.4");
	assert_eq!(var.modification_count(), 2);
}

#[test]
fn test_first_registered_default_wins() {
	let mut store = VarStore::new();
	store.host_register("com_maxfps", "125", VarFlags::empty()).unwrap();
	store.host_register("com_maxfps", "60", VarFlags::empty()).unwrap();

	let var = store.find("com_maxfps").unwrap();
	assert_eq!(var.current(), "125");
	assert_eq!(var.reset_value(), "125");
}

#[test]
fn test_numeric_projections_follow_current() {
	let mut store = VarStore::new();
	store.host_register("r_gamma", "1.4", VarFlags::empty()).unwrap();
	let var = store.find("r_gamma").unwrap();
	assert_eq!(var.as_float(), 1.4);
	assert_eq!(var.as_int(), 1);

	store
		.command_write("r_gamma", "2", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	let var = store.find("r_gamma").unwrap();
	assert_eq!(var.as_float(), 2.0);
	assert_eq!(var.as_int(), 2);

	// Non-numeric text projects to zero.
	store
		.command_write("r_gamma", "auto", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	let var = store.find("r_gamma").unwrap();
	assert_eq!(var.as_float(), 0.0);
	assert_eq!(var.as_int(), 0);
}

#[test]
fn test_latch_projections_track_committed_value() {
	let mut store = VarStore::new();
	store.host_register("sv_maxclients", "8", VarFlags::LATCH).unwrap();
	store
		.command_write("sv_maxclients", "16", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	let var = store.find("sv_maxclients").unwrap();
	assert_eq!(var.latched(), Some("16"));
	assert_eq!(var.as_int(), 8);
}

#[test]
fn test_effective_flags_are_tier_union() {
	let mut store = VarStore::new();
	store.host_register("net_port", "27960", VarFlags::LATCH).unwrap();
	store
		.command_write("net_port", "27961", VarFlags::ARCHIVE, WriteMode::Normal, false)
		.unwrap();

	let flags = store.find("net_port").unwrap().flags();
	assert!(flags.contains(VarFlags::LATCH));
	assert!(flags.contains(VarFlags::ARCHIVE));
	assert!(flags.contains(VarFlags::USER_CREATED));
}

#[test]
fn test_unset_clears_tiers_but_keeps_record() {
	let mut store = VarStore::new();
	store
		.command_write("ui_skin", "red", VarFlags::ARCHIVE, WriteMode::Normal, false)
		.unwrap();
	store.unset("ui_skin", false).unwrap();

	let var = store.find("ui_skin").unwrap();
	assert_eq!(var.current(), "");
	assert_eq!(var.flags(), VarFlags::empty());
	assert_eq!(store.len(), 1);
}

#[test]
fn test_restart_reverts_to_defaults() {
	let mut store = VarStore::new();
	store.host_register("r_gamma", "1.4", VarFlags::empty()).unwrap();
	store.host_register("version", "1.0", VarFlags::READ_ONLY).unwrap();
	store
		.command_write("r_gamma", "2.0", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();

	store.restart_all();
	assert_eq!(store.get_string("r_gamma"), "1.4");
	assert_eq!(store.get_string("version"), "1.0");
}
