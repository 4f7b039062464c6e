//! Property tests over generated flat structs.

use proptest::prelude::*;

use setgen_codegen::{compile_header, RowOffset, DEFAULT_GUARD};
use setgen_core::Field;

fn leaf(i: usize, tag: u8, internal: bool) -> Field {
    let name = format!("Field{i}");
    let field = match tag % 5 {
        0 => Field::bool(name, i % 2 == 0, "a flag"),
        1 => Field::int(name, i as i64, "a number"),
        2 => Field::string(name, Some("text"), "some text"),
        3 => Field::color(name, "#ffffff", "a color"),
        _ => Field::comment(format!("note {i}")),
    };
    if internal && !field.is_comment() {
        field.internal()
    } else {
        field
    }
}

fn flat_struct() -> impl Strategy<Value = Field> {
    prop::collection::vec((any::<u8>(), any::<bool>()), 0..24).prop_map(|layout| {
        let fields = layout
            .into_iter()
            .enumerate()
            .map(|(i, (tag, internal))| leaf(i, tag, internal))
            .collect();
        Field::structure("Prefs", fields, "")
    })
}

proptest! {
    #[test]
    fn one_row_per_visible_field(root in flat_struct()) {
        let header = compile_header(&root).unwrap();
        let fields = root.fields().unwrap();
        let rows = &header.tables[0].rows;

        let visible: Vec<_> = fields.iter().filter(|f| !f.internal).map(|f| f.name.as_str()).collect();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        prop_assert_eq!(names, visible);

        let comments = fields.iter().filter(|f| f.is_comment()).count();
        let sentinels = rows.iter().filter(|r| r.offset == RowOffset::NoStorage).count();
        prop_assert_eq!(comments, sentinels);
    }

    #[test]
    fn row_positions_point_at_matching_members(root in flat_struct()) {
        let header = compile_header(&root).unwrap();
        let members = &header.structs[0].members;
        for row in &header.tables[0].rows {
            if let RowOffset::Member { ident, index } = &row.offset {
                prop_assert_eq!(&members[*index].ident, ident);
            }
        }
    }

    #[test]
    fn rendering_is_deterministic(root in flat_struct()) {
        let a = compile_header(&root).unwrap().render(DEFAULT_GUARD);
        let b = compile_header(&root).unwrap().render(DEFAULT_GUARD);
        prop_assert_eq!(a, b);
    }
}
