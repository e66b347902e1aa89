//! Property-based tests for construction, defaults and matching
//!
//! - Group count vs. parameter count always decides construction
//! - Defaults contain exactly the parameters that declare one
//! - Mismatched input is reported unchanged
//! - Presence of a parameter follows its own group only

use proptest::prelude::*;
use reargparse::{Parameter, ReargError, RegexArgConverter};
use serde_json::json;

fn params(n: usize) -> Vec<Parameter> {
    (0..n).map(|i| Parameter::new(format!("p{i}"))).collect()
}

/// `n` independent optional groups: `(?:<i>=(\w+);)?` each
fn optional_groups(n: usize) -> String {
    (0..n).map(|i| format!("(?:{i}=(\\w+);)?")).collect::<Vec<_>>().join("")
}

proptest! {
    #[test]
    fn construction_follows_counts(ngroups in 0usize..8, nparams in 0usize..8) {
        let pattern = "(x)".repeat(ngroups);
        let result = RegexArgConverter::new(&pattern, params(nparams));

        match result {
            Ok(_) => prop_assert_eq!(ngroups, nparams),
            Err(ReargError::TooManyGroups { nparams: p, ngroups: g }) => {
                prop_assert!(g > p);
                prop_assert_eq!((p, g), (nparams, ngroups));
            }
            Err(ReargError::NotEnoughGroups { nparams: p, ngroups: g }) => {
                prop_assert!(g < p);
                prop_assert_eq!((p, g), (nparams, ngroups));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn defaults_are_exactly_declared_defaults(flags in prop::collection::vec(any::<bool>(), 0..8)) {
        let parameters: Vec<Parameter> = flags
            .iter()
            .enumerate()
            .map(|(i, &has)| {
                let p = Parameter::new(format!("p{i}"));
                if has { p.default(i as i64) } else { p }
            })
            .collect();
        let converter = RegexArgConverter::new(&optional_groups(flags.len()), parameters).unwrap();

        let first = converter.defaults();
        let second = converter.defaults();
        prop_assert_eq!(first.to_value(), second.to_value());

        for (i, &has) in flags.iter().enumerate() {
            let name = format!("p{i}");
            prop_assert_eq!(first.contains(&name), has);
            if has {
                prop_assert_eq!(first.get(&name), Some(&json!(i as i64)));
            }
        }
    }

    #[test]
    fn mismatch_keeps_input_verbatim(input in "[^0-9]*") {
        let converter = RegexArgConverter::new(r"^(\d+)$", params(1)).unwrap();
        match converter.parse_blocking(&input) {
            Err(ReargError::NotMatchedWithPattern { argstr, .. }) => prop_assert_eq!(argstr, input),
            other => prop_assert!(false, "expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn presence_follows_own_group(present in prop::collection::vec(any::<bool>(), 1..6)) {
        let converter = RegexArgConverter::new(
            &format!("^{}$", optional_groups(present.len())),
            params(present.len()),
        )
        .unwrap();

        let input: String = present
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| format!("{i}=v{i};"))
            .collect();

        let args = converter.parse_blocking(&input).unwrap();
        for (i, &on) in present.iter().enumerate() {
            let name = format!("p{i}");
            prop_assert_eq!(args.contains(&name), on);
            if on {
                prop_assert_eq!(args.get(&name), Some(&json!(format!("v{i}"))));
            }
        }
    }
}
