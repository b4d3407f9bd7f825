//! Mixed content: text interleaved with typed child elements.

#[cfg(test)]
mod tests {
    use shipbind_model::{
        FieldDescriptor, MixedItem, NodeSchema, Scalar, SchemaSet, SimpleType, TypedNode,
    };
    use shipbind_xml::{BuildOptions, ExportOptions, TypeRegistry};

    static LINK: NodeSchema = NodeSchema::simple_content(
        "Link",
        SimpleType::STRING,
        &[FieldDescriptor::attribute("href", SimpleType::STRING).required()],
    );
    static PARAGRAPH: NodeSchema = NodeSchema::mixed(
        "Paragraph",
        &[
            FieldDescriptor::simple("b", SimpleType::STRING).unbounded(),
            FieldDescriptor::simple("sub", SimpleType::INTEGER).unbounded(),
            FieldDescriptor::node("link", "Link").unbounded(),
            FieldDescriptor::any("extra").unbounded(),
        ],
    );
    static SET: SchemaSet = SchemaSet {
        name: "notes",
        namespace: "urn:notes",
        types: &[&LINK, &PARAGRAPH],
        elements: &[("Paragraph", "Paragraph")],
    };

    const INSTRUCTIONS: &str = r#"<Paragraph>Ship <b>fragile</b> items via <link href="https://depot.example/jo">depot</link>, code H<sub>2</sub>O.</Paragraph>"#;

    fn registry() -> TypeRegistry {
        TypeRegistry::builder().schema_set(&SET).build()
    }

    fn compact() -> ExportOptions {
        ExportOptions {
            pretty: false,
            xml_declaration: false,
            ..ExportOptions::default()
        }
    }

    #[test]
    fn test_should_keep_mixed_items_in_document_order() {
        let doc = shipbind_xml::parse_str(INSTRUCTIONS, &registry(), &BuildOptions::default())
            .expect("valid paragraph");
        let items = doc.root.mixed();
        assert_eq!(items.len(), 7);
        assert_eq!(items[0], MixedItem::text("Ship "));
        assert_eq!(items[1], MixedItem::simple("b", "fragile"));
        assert_eq!(items[2], MixedItem::text(" items via "));
        match &items[3] {
            MixedItem::Complex { name, node } => {
                assert_eq!(name, "link");
                assert_eq!(node.str_value("href"), Some("https://depot.example/jo"));
                assert_eq!(node.text(), Some(&Scalar::from("depot")));
            }
            other => panic!("expected a link, found {other:?}"),
        }
        assert_eq!(items[5], MixedItem::simple("sub", 2_i64));
        assert_eq!(items[6], MixedItem::text("O."));
        assert_eq!(doc.root.count("b"), 1);
    }

    #[test]
    fn test_should_round_trip_mixed_content() {
        let doc = shipbind_xml::parse_str(INSTRUCTIONS, &registry(), &BuildOptions::default())
            .expect("valid paragraph");
        assert_eq!(doc.to_xml(&compact()).expect("export"), INSTRUCTIONS);

        // Text-bearing elements stay on one line when pretty printing.
        let pretty = ExportOptions {
            xml_declaration: false,
            ..ExportOptions::default()
        };
        assert_eq!(
            doc.to_xml(&pretty).expect("export"),
            format!("{INSTRUCTIONS}\n")
        );
    }

    #[test]
    fn test_should_keep_wildcard_children_in_place() {
        let xml = r#"<Paragraph>See <extra code="7">gate <i>4</i></extra> then <b>sign</b>.</Paragraph>"#;
        let doc = shipbind_xml::parse_str(xml, &registry(), &BuildOptions::default())
            .expect("valid paragraph");
        let items = doc.root.mixed();
        assert_eq!(items.len(), 5);
        assert_eq!(
            items[1],
            MixedItem::any("extra", r#"<extra code="7">gate <i>4</i></extra>"#)
        );
        assert_eq!(doc.root.count("extra"), 1);
        assert!(doc.root.get("extra").is_none());

        assert_eq!(doc.to_xml(&compact()).expect("export"), xml);
    }

    #[test]
    fn test_should_keep_qualified_attributes() {
        let xml = r#"<Paragraph xmlns:n="urn:notes">Go via <link n:href="https://depot.example/jo">depot</link></Paragraph>"#;
        let doc = shipbind_xml::parse_str(xml, &registry(), &BuildOptions::default())
            .expect("valid paragraph");
        let MixedItem::Complex { node: link, .. } = &doc.root.mixed()[1] else {
            panic!("expected a link");
        };
        assert_eq!(link.str_value("href"), Some("https://depot.example/jo"));
        assert_eq!(link.field_prefix("href"), Some("n"));

        assert_eq!(doc.to_xml(&compact()).expect("export"), xml);
    }

    #[test]
    fn test_should_drop_indentation_between_children() {
        let doc = shipbind_xml::parse_str(
            "<Paragraph>\n    <b>one</b>\n    <b>two</b>\n</Paragraph>",
            &registry(),
            &BuildOptions::default(),
        )
        .expect("valid paragraph");
        assert_eq!(
            doc.to_xml(&compact()).expect("export"),
            "<Paragraph><b>one</b><b>two</b></Paragraph>"
        );
    }

    #[test]
    fn test_should_export_mixed_content_built_in_code() {
        let mut paragraph = TypedNode::new(&PARAGRAPH);
        paragraph.push_mixed(MixedItem::text("Deliver to "));
        paragraph.push_mixed(MixedItem::simple("b", "Gate 4"));
        paragraph.push_mixed(MixedItem::text(" < noon"));

        assert_eq!(
            shipbind_xml::to_xml(&paragraph, &compact()).expect("export"),
            "<Paragraph>Deliver to <b>Gate 4</b> &lt; noon</Paragraph>"
        );
    }
}
