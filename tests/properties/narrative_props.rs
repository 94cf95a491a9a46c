use proptest::prelude::*;

use narrate::narrative::{Converter, FormSet, ListForm, convert};

const CONNECTIVES: [&str; 4] = ["また", "次に", "まず", "最後に"];

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

#[derive(Debug, Clone)]
enum Block {
    Keyed(String, Vec<(String, String)>),
    Plain(String, Vec<String>),
    Numbered(String, Vec<String>),
    Paragraph(String),
}

impl Block {
    fn render(&self) -> String {
        match self {
            Self::Keyed(title, items) => {
                let mut out = format!("**{title}**：\n");
                for (key, body) in items {
                    out.push_str(&format!("- **{key}**：{body}\n"));
                }
                out
            }
            Self::Plain(title, items) => {
                let mut out = format!("**{title}**：\n");
                for body in items {
                    out.push_str(&format!("- {body}\n"));
                }
                out
            }
            Self::Numbered(title, items) => {
                let mut out = format!("**{title}**：\n");
                for (i, body) in items.iter().enumerate() {
                    out.push_str(&format!("{}. {body}\n", i + 1));
                }
                out
            }
            Self::Paragraph(text) => format!("{text}\n"),
        }
    }
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        (word(), prop::collection::vec((word(), word()), 1..5))
            .prop_map(|(title, items)| Block::Keyed(title, items)),
        (word(), prop::collection::vec(word(), 1..5))
            .prop_map(|(title, items)| Block::Plain(title, items)),
        (word(), prop::collection::vec(word(), 1..5))
            .prop_map(|(title, items)| Block::Numbered(title, items)),
        word().prop_map(Block::Paragraph),
    ]
}

fn arb_document() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_block(), 0..6).prop_map(|blocks| {
        blocks
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #[test]
    fn convert_never_panics(input in ".{0,400}") {
        let _ = convert(&input);
    }

    #[test]
    fn text_without_bold_markers_is_unchanged(input in "[^*]{0,300}") {
        prop_assert_eq!(convert(&input), input);
    }

    #[test]
    fn single_item_lists_have_no_connectives(
        title in word(),
        key in word(),
        body in word(),
        form in prop_oneof![Just(ListForm::Keyed), Just(ListForm::Plain), Just(ListForm::Numbered)],
    ) {
        let input = match form {
            ListForm::Keyed => format!("**{title}**：\n- **{key}**：{body}\n"),
            ListForm::Plain => format!("**{title}**：\n- {body}\n"),
            ListForm::Numbered => format!("**{title}**：\n1. {body}\n"),
        };
        let out = convert(&input);
        let expected_prefix = format!("**{title}**：\n\n");
        prop_assert!(out.starts_with(&expected_prefix));
        prop_assert!(out.ends_with("。\n"));
        for connective in CONNECTIVES {
            prop_assert!(!out.contains(connective));
        }
    }

    #[test]
    fn numbered_items_keep_order(title in word(), items in prop::collection::vec(word(), 2..8)) {
        let input = Block::Numbered(title.clone(), items.clone()).render();
        let last = items.len() - 1;
        let mut expected = format!("**{title}**：\n\n");
        for (i, item) in items.iter().enumerate() {
            let lead = if i == 0 { "まず、" } else if i == last { "最後に、" } else { "次に、" };
            expected.push_str(&format!("{lead}{item}。"));
        }
        expected.push('\n');
        prop_assert_eq!(convert(&input), expected);
    }

    #[test]
    fn conversion_reaches_a_fixed_point(doc in arb_document()) {
        let once = convert(&doc);
        prop_assert_eq!(convert(&once), once);
    }

    #[test]
    fn bullet_forms_leave_numbered_documents_alone(title in word(), items in prop::collection::vec(word(), 1..6)) {
        let input = Block::Numbered(title, items).render();
        let bullets = Converter::new(FormSet::only(&[ListForm::Keyed, ListForm::Plain]));
        prop_assert_eq!(bullets.convert(&input).output, input.clone());
        prop_assert_ne!(convert(&input), input);
    }

    #[test]
    fn every_list_block_is_rewritten(blocks in prop::collection::vec(arb_block(), 1..6)) {
        let lists = blocks.iter().filter(|b| !matches!(b, Block::Paragraph(_))).count();
        let doc = blocks.iter().map(Block::render).collect::<Vec<_>>().join("\n");
        prop_assert_eq!(Converter::default().convert(&doc).rewritten, lists);
    }
}
