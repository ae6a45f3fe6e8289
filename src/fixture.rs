/// The document every strategy extracts `item1[2].some.thing` from.
pub const FIXTURE: &str = r#"{
	"item1": ["aryitem1", "aryitem2", {"some": {"thing": "coolObj"}}],
	"item2": "simplestringvalue",
	"item3": {
		"item4": {
			"item5": {
				"item6": ["thing1", 2],
				"item7": {"reallyinnerobjkey": {"is": "anobject"}}
			}
		}
	}
}"#;

/// [`FIXTURE`] without insignificant whitespace.
pub const FIXTURE_COMPACT: &str = r#"{"item1":["aryitem1","aryitem2",{"some":{"thing":"coolObj"}}],"item2":"simplestringvalue","item3":{"item4":{"item5":{"item6":["thing1",2],"item7":{"reallyinnerobjkey":{"is":"anobject"}}}}}}"#;
