//! Type substitution through `xsi:type`, overrides and aliases.

#[cfg(test)]
mod tests {
    use shipbind_model::{FieldDescriptor, NodeSchema, SchemaSet, SimpleType};
    use shipbind_xml::{BuildOptions, ExportOptions, TypeRegistry};

    static ITEM: NodeSchema = NodeSchema::new(
        "Item",
        &[
            FieldDescriptor::simple("Description", SimpleType::STRING),
            FieldDescriptor::simple("Weight", SimpleType::DOUBLE),
        ],
    );
    static FRAGILE_ITEM: NodeSchema = NodeSchema::new(
        "FragileItem",
        &[
            FieldDescriptor::simple("Description", SimpleType::STRING),
            FieldDescriptor::simple("Weight", SimpleType::DOUBLE),
            FieldDescriptor::simple("Handling", SimpleType::STRING).required(),
        ],
    );
    static CUSTOM_ITEM: NodeSchema = NodeSchema::new(
        "CustomItem",
        &[
            FieldDescriptor::simple("Description", SimpleType::STRING),
            FieldDescriptor::simple("Weight", SimpleType::STRING),
        ],
    );
    static PARCEL: NodeSchema = NodeSchema::new(
        "Parcel",
        &[FieldDescriptor::node("Item", "Item").unbounded()],
    );
    static SET: SchemaSet = SchemaSet {
        name: "parcels",
        namespace: "urn:parcels",
        types: &[&ITEM, &FRAGILE_ITEM, &PARCEL],
        elements: &[("Parcel", "Parcel")],
    };

    const PARCEL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Parcel xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <Item>
        <Description>Books</Description>
        <Weight>2</Weight>
    </Item>
    <Item xsi:type="FragileItem">
        <Description>Vase</Description>
        <Weight>1.5</Weight>
        <Handling>Upright</Handling>
    </Item>
</Parcel>
"#;

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
    fn test_should_bind_hinted_children_as_subtype() {
        let doc = shipbind_xml::parse_str(PARCEL_XML, &registry(), &BuildOptions::default())
            .expect("valid parcel");
        assert!(doc.diagnostics.is_empty(), "{:?}", doc.diagnostics.messages());

        let types: Vec<_> = doc.root.nodes("Item").map(|item| item.type_name()).collect();
        assert_eq!(types, ["Item", "FragileItem"]);

        let fragile = doc.root.nodes("Item").nth(1).expect("second item");
        assert_eq!(fragile.tag(), "Item");
        assert_eq!(fragile.type_hint(), Some("FragileItem"));
        assert_eq!(fragile.str_value("Handling"), Some("Upright"));
    }

    #[test]
    fn test_should_write_type_hints_back() {
        let doc = shipbind_xml::parse_str(PARCEL_XML, &registry(), &BuildOptions::default())
            .expect("valid parcel");
        assert_eq!(
            doc.to_xml(&ExportOptions::default()).expect("export"),
            PARCEL_XML
        );
    }

    #[test]
    fn test_should_fall_back_to_declared_type_for_unknown_hint() {
        let doc = shipbind_xml::parse_str(
            r#"<Parcel><Item xsi:type="Mystery"><Weight>3</Weight></Item></Parcel>"#,
            &registry(),
            &BuildOptions::default(),
        )
        .expect("unknown hints are tolerated");
        let item = doc.root.node("Item").expect("item");
        assert_eq!(item.type_name(), "Item");
        assert_eq!(item.double("Weight"), Some(3.0));
    }

    #[test]
    fn test_should_report_subtype_requirements() {
        let doc = shipbind_xml::parse_str(
            "<Parcel>\n<Item xsi:type=\"FragileItem\"><Weight>3</Weight></Item></Parcel>",
            &registry(),
            &BuildOptions::default(),
        )
        .expect("missing fields are not fatal");
        assert_eq!(
            doc.diagnostics.messages(),
            ["Handling near line 2: required value is missing"]
        );
    }

    #[test]
    fn test_should_prefer_override_schema() {
        let registry = TypeRegistry::builder()
            .schema_set(&SET)
            .override_type("Item", &CUSTOM_ITEM)
            .build();
        let doc = shipbind_xml::parse_str(PARCEL_XML, &registry, &BuildOptions::default())
            .expect("valid parcel");

        let types: Vec<_> = doc.root.nodes("Item").map(|item| item.type_name()).collect();
        assert_eq!(types, ["CustomItem", "FragileItem"]);
        let first = doc.root.node("Item").expect("first item");
        assert_eq!(first.str_value("Weight"), Some("2"));
    }

    #[test]
    fn test_should_export_hints_set_in_code() {
        let registry = registry();
        let mut parcel = registry.new_node("Parcel").expect("known type");
        let mut lamp = registry.new_node("FragileItem").expect("known type");
        lamp.set("Description", "Lamp").expect("known field");
        lamp.set("Handling", "Upright").expect("known field");
        lamp.set_type_hint(Some("FragileItem".to_owned()));
        parcel.push("Item", lamp).expect("known field");

        assert_eq!(
            shipbind_xml::to_xml(&parcel, &compact()).expect("export"),
            concat!(
                r#"<Parcel xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                r#"<Item xsi:type="FragileItem"><Description>Lamp</Description><Handling>Upright</Handling></Item>"#,
                "</Parcel>"
            )
        );
    }

    #[test]
    fn test_should_tag_new_nodes_with_alias() {
        let registry = TypeRegistry::builder()
            .schema_set(&SET)
            .alias("Package", "Parcel")
            .build();
        let parcel = registry.new_node("Parcel").expect("known type");
        assert_eq!(
            shipbind_xml::to_xml(&parcel, &compact()).expect("export"),
            "<Package/>"
        );

        let doc = shipbind_xml::parse_str("<Package/>", &registry, &BuildOptions::default())
            .expect("alias tag resolves");
        assert_eq!(doc.root.type_name(), "Parcel");
    }
}
