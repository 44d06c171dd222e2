use crate::{VarFlags, VarStore, WriteMode};

#[test]
fn test_absent_variables_read_as_empty_or_zero() {
	let store = VarStore::new();
	assert_eq!(store.get_string("nope"), "");
	assert_eq!(store.get_float("nope"), 0.0);
	assert_eq!(store.get_integer("nope"), 0);
	assert_eq!(store.flags("nope"), VarFlags::empty());
	assert!(store.find("nope").is_none());
}

#[test]
fn test_flag_query_reports_and_check_clears_modified() {
	let mut store = VarStore::new();
	store.host_register("r_gamma", "1.4", VarFlags::empty()).unwrap();
	assert!(!store.flags("r_gamma").contains(VarFlags::MODIFIED));

	store
		.command_write("r_gamma", "2.0", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	assert!(store.flags("r_gamma").contains(VarFlags::MODIFIED));

	assert!(store.check_modified("r_gamma"));
	assert!(!store.check_modified("r_gamma"));
	assert!(!store.flags("r_gamma").contains(VarFlags::MODIFIED));
}

#[test]
fn test_list_matching_globs_case_insensitively() {
	let mut store = VarStore::new();
	for name in ["r_gamma", "r_mode", "s_volume", "R_window"] {
		store.host_register(name, "0", VarFlags::empty()).unwrap();
	}

	assert_eq!(store.list_matching("r_*"), vec!["r_gamma", "r_mode", "R_window"]);
	assert_eq!(store.list_matching("*volume*"), vec!["s_volume"]);
	assert_eq!(store.list_matching("").len(), 4);
}

#[test]
fn test_info_string_collects_flagged_variables() {
	let mut store = VarStore::new();
	store
		.host_register("sv_hostname", "Shipyard", VarFlags::NET_VISIBLE)
		.unwrap();
	store.host_register("g_needpass", "0", VarFlags::NET_VISIBLE).unwrap();
	store.host_register("cl_private", "7", VarFlags::empty()).unwrap();

	assert_eq!(
		store.info_string(VarFlags::NET_VISIBLE),
		"\\sv_hostname\\Shipyard\\g_needpass\\0"
	);
}

#[test]
fn test_info_string_skips_separator_characters() {
	let mut store = VarStore::new();
	store
		.host_register("sv_motd", "a;b", VarFlags::NET_VISIBLE)
		.unwrap();
	store
		.host_register("sv_tag", "ok", VarFlags::NET_VISIBLE)
		.unwrap();
	assert_eq!(store.info_string(VarFlags::NET_VISIBLE), "\\sv_tag\\ok");
}

#[test]
fn test_modified_flag_accumulator_masks_and_clears() {
	let mut store = VarStore::new();
	store
		.host_register("sv_hostname", "Shipyard", VarFlags::NET_VISIBLE)
		.unwrap();
	// Registration itself changes the flag set from empty, which the
	// accumulator tracks.
	assert_eq!(
		store.take_modified_flags(VarFlags::NET_VISIBLE),
		VarFlags::NET_VISIBLE
	);
	assert_eq!(store.take_modified_flags(VarFlags::NET_VISIBLE), VarFlags::empty());

	store
		.command_write("sv_hostname", "Drydock", VarFlags::empty(), WriteMode::Normal, false)
		.unwrap();
	assert_eq!(
		store.take_modified_flags(VarFlags::NET_VISIBLE),
		VarFlags::NET_VISIBLE
	);
}
