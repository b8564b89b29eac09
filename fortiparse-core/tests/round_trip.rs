use std::collections::BTreeMap;

use fortiparse_core::{extract, tokenize, DirectiveValue};
use proptest::prelude::*;

fn render_block(directives: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = String::from("edit 1\n");
    for (key, values) in directives {
        let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
        out.push_str(&format!("    set {key} {}\n", quoted.join(" ")));
    }
    out.push_str("next\n");
    out
}

proptest! {
    #[test]
    fn written_directives_are_recovered(
        directives in prop::collection::btree_map(
            "[a-z][a-z0-9-]{0,10}",
            prop::collection::vec("[A-Za-z0-9_.:/ -]{0,12}", 1..4),
            0..8,
        )
    ) {
        let text = render_block(&directives);
        let blocks = tokenize(&text).expect("well-formed input");
        prop_assert_eq!(blocks.len(), 1);

        let map = extract(&blocks[0]);
        prop_assert_eq!(map.len(), directives.len());
        for (key, values) in &directives {
            let expected = if values.len() == 1 {
                DirectiveValue::Scalar(values[0].clone())
            } else {
                DirectiveValue::List(values.clone())
            };
            prop_assert_eq!(map.get(key), Some(&expected));
        }
    }
}

#[test]
fn reparsing_is_deterministic() {
    let text = "config firewall vip\n  edit \"web\"\n    set extip 203.0.113.5\n  next\nend\n";
    let first = tokenize(text).expect("parse");
    let second = tokenize(text).expect("parse");
    assert_eq!(first, second);
    assert_eq!(extract(&first[0].children[0]), extract(&second[0].children[0]));
}
