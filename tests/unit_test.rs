// Unit tests for user-dashboard
// These exercise the public API without a terminal

#[cfg(test)]
mod store_tests {
    use user_dashboard::store::{User, UserStore};

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let mut store = UserStore::new();
        let ids: Vec<u64> = (0..50)
            .map(|i| store.insert(format!("user{i}"), format!("u{i}@x.com")))
            .collect();
        let mut dedup = ids.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_get_returns_inserted_record() {
        let mut store = UserStore::new();
        let id = store.insert("Amy".into(), "amy@x.com".into());
        assert_eq!(
            store.get(id),
            Some(&User {
                id,
                name: "Amy".into(),
                email: "amy@x.com".into()
            })
        );
        assert_eq!(store.get(id + 1), None);
    }
}

#[cfg(test)]
mod dashboard_tests {
    use user_dashboard::ValidationError;
    use user_dashboard::dashboard::{Dashboard, Submitted};
    use user_dashboard::form::FormData;

    fn with_users(n: usize) -> Dashboard {
        let mut d = Dashboard::new();
        for i in 0..n {
            d.submit_form(FormData::new(format!("user{i:02}"), format!("u{i}@x.com")))
                .unwrap();
        }
        d
    }

    #[test]
    fn test_valid_create_appends_exactly_one() {
        let mut d = with_users(4);
        let existing: Vec<u64> = d.store.users().iter().map(|u| u.id).collect();
        let Ok(Submitted::Created(id)) = d.submit_form(FormData::new("New", "new@x.com")) else {
            panic!("expected a created record");
        };
        assert_eq!(d.store.len(), 5);
        assert!(!existing.contains(&id));
        assert_eq!(d.store.users().last().map(|u| u.id), Some(id));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut d = with_users(2);
        let errs = d.submit_form(FormData::new("", "ok@x.com")).unwrap_err();
        assert_eq!(errs.name, Some(ValidationError::NameRequired));
        assert_eq!(errs.name.unwrap().to_string(), "Name is required");
        assert_eq!(errs.email, None);
        assert_eq!(d.store.len(), 2);
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let mut d = with_users(2);
        for bad in ["foo", "foo@bar"] {
            let errs = d.submit_form(FormData::new("Foo", bad)).unwrap_err();
            assert_eq!(errs.email, Some(ValidationError::InvalidEmail));
            assert_eq!(errs.email.unwrap().to_string(), "Invalid email format");
            assert_eq!(d.store.len(), 2);
        }
    }

    #[test]
    fn test_edit_replaces_fields_in_place() {
        let mut d = with_users(3);
        let before: Vec<u64> = d.store.users().iter().map(|u| u.id).collect();
        let target = before[2];
        d.start_edit(target);
        assert_eq!(d.submit_form(FormData::new("X", "y@z.com")), Ok(Submitted::Updated(target)));
        let after: Vec<u64> = d.store.users().iter().map(|u| u.id).collect();
        assert_eq!(before, after);
        assert_eq!(d.store.users()[2].name, "X");
        assert_eq!(d.store.users()[2].email, "y@z.com");
    }

    #[test]
    fn test_delete_removes_only_matching_and_is_idempotent() {
        let mut d = with_users(3);
        let id = d.store.users()[1].id;
        assert!(d.delete(id).is_some());
        assert_eq!(d.store.len(), 2);
        assert!(d.store.get(id).is_none());
        assert!(d.delete(id).is_none());
        assert_eq!(d.store.len(), 2);
    }

    #[test]
    fn test_twelve_records_make_three_pages() {
        let mut d = with_users(12);
        assert_eq!(d.total_pages(), 3);
        assert_eq!(d.visible_users().len(), 5);
        d.go_to_page(2);
        assert_eq!(d.visible_users().len(), 5);
        d.go_to_page(3);
        assert_eq!(d.visible_users().len(), 2);
    }

    #[test]
    fn test_sort_toggle_round_trips_without_touching_insertion_order() {
        let mut d = Dashboard::new();
        for name in ["Carl", "Amy", "Bob"] {
            d.submit_form(FormData::new(name, format!("{}@x.com", name.to_lowercase())))
                .unwrap();
        }
        let insertion: Vec<String> = d.store.users().iter().map(|u| u.name.clone()).collect();
        let asc: Vec<String> = d.sorted_users().iter().map(|u| u.name.clone()).collect();
        d.toggle_sort();
        let desc: Vec<String> = d.sorted_users().iter().map(|u| u.name.clone()).collect();
        d.toggle_sort();
        let again: Vec<String> = d.sorted_users().iter().map(|u| u.name.clone()).collect();

        assert_eq!(asc, ["Amy", "Bob", "Carl"]);
        assert_eq!(desc, ["Carl", "Bob", "Amy"]);
        assert_eq!(asc, again);
        let still: Vec<String> = d.store.users().iter().map(|u| u.name.clone()).collect();
        assert_eq!(insertion, still);
        assert_eq!(d.total_pages(), 1);
    }

    #[test]
    fn test_bob_and_amy_scenario() {
        let mut d = Dashboard::new();
        d.submit_form(FormData::new("Bob", "bob@x.com")).unwrap();
        d.submit_form(FormData::new("Amy", "amy@x.com")).unwrap();
        let names: Vec<&str> = d.visible_users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Bob"]);
        d.toggle_sort();
        let names: Vec<&str> = d.visible_users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Amy"]);
    }

    #[test]
    fn test_accented_names_sort_by_base_letter() {
        let mut d = Dashboard::new();
        for (i, name) in ["Zoe", "Émile", "Eve", "Ángel", "Bob"].into_iter().enumerate() {
            d.submit_form(FormData::new(name, format!("p{i}@x.com"))).unwrap();
        }
        let names: Vec<&str> = d.sorted_users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ángel", "Bob", "Émile", "Eve", "Zoe"]);
        d.toggle_sort();
        let names: Vec<&str> = d.sorted_users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Zoe", "Eve", "Émile", "Bob", "Ángel"]);
    }
}

#[cfg(test)]
mod keymap_tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use user_dashboard::app::keymap::{KeyAction, Keymap, format_action};

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        let cases = [
            (KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit),
            (KeyCode::Tab, KeyModifiers::NONE, KeyAction::FocusNext),
            (KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::FocusPrev),
            (KeyCode::Enter, KeyModifiers::NONE, KeyAction::Activate),
            (KeyCode::Char('e'), KeyModifiers::NONE, KeyAction::EditSelection),
            (KeyCode::Right, KeyModifiers::NONE, KeyAction::NextPage),
        ];
        for (code, mods, action) in cases {
            assert_eq!(km.resolve(&KeyEvent::new(code, mods)), Some(action));
        }
    }

    #[test]
    fn test_format_key() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('c')), "Ctrl+c");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::PageDown), "PageDown");
        assert_eq!(Keymap::format_key(KeyModifiers::ALT, KeyCode::Char('d')), "Alt+d");
        assert_eq!(Keymap::format_key(KeyModifiers::SHIFT, KeyCode::BackTab), "Shift+BackTab");
        assert_eq!(format_action(KeyAction::ToggleSort), "ToggleSort");
    }
}
