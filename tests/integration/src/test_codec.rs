//! Primitive values bound from documents and written back in canonical form.

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{FixedOffset, TimeZone};
    use rust_decimal::Decimal;
    use shipbind_model::{
        FieldDescriptor, NodeSchema, PrimitiveKind, Scalar, SchemaSet, SimpleType,
    };
    use shipbind_xml::{BuildOptions, ExportOptions, TypeRegistry, XmlError};

    static SAMPLE: NodeSchema = NodeSchema::new(
        "Sample",
        &[
            FieldDescriptor::simple("Count", SimpleType::INTEGER),
            FieldDescriptor::simple("Amount", SimpleType::DECIMAL),
            FieldDescriptor::simple("Ratio", SimpleType::DOUBLE),
            FieldDescriptor::simple("Flag", SimpleType::BOOLEAN),
            FieldDescriptor::simple("Stamp", SimpleType::DATETIME),
            FieldDescriptor::simple("Local", SimpleType::DATETIME),
            FieldDescriptor::simple("Day", SimpleType::DATE),
            FieldDescriptor::simple("At", SimpleType::TIME),
            FieldDescriptor::simple("Blob", SimpleType::BASE64),
            FieldDescriptor::simple("Codes", SimpleType::list_of(PrimitiveKind::Integer)),
            FieldDescriptor::simple("Label", SimpleType::STRING),
        ],
    );
    static SET: SchemaSet = SchemaSet {
        name: "samples",
        namespace: "urn:samples",
        types: &[&SAMPLE],
        elements: &[("Sample", "Sample")],
    };

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

    const SAMPLE_XML: &str = concat!(
        "<Sample>",
        "<Count> 42 </Count>",
        "<Amount>12.50</Amount>",
        "<Ratio>1.0E3</Ratio>",
        "<Flag>1</Flag>",
        "<Stamp>2024-03-01T10:00:00Z</Stamp>",
        "<Local>2024-03-01T10:00:00.250+05:30</Local>",
        "<Day>2024-02-29</Day>",
        "<At>23:59:59</At>",
        "<Blob>aGVs\nbG8=</Blob>",
        "<Codes>1  2\t3</Codes>",
        "<Label>  padded  </Label>",
        "</Sample>"
    );

    #[test]
    fn test_should_bind_typed_values() {
        let doc = shipbind_xml::parse_str(SAMPLE_XML, &registry(), &BuildOptions::default())
            .expect("valid sample");
        let root = &doc.root;

        assert_eq!(root.integer("Count"), Some(42));
        assert_eq!(
            root.decimal("Amount"),
            Some(Decimal::from_str("12.50").expect("decimal"))
        );
        assert_eq!(root.double("Ratio"), Some(1000.0));
        assert_eq!(root.boolean("Flag"), Some(true));
        assert_eq!(root.str_value("Label"), Some("  padded  "));
        assert_eq!(
            root.scalar("Blob").and_then(Scalar::as_bytes),
            Some(&b"hello"[..])
        );
        assert_eq!(
            root.scalar("Codes").and_then(Scalar::as_list),
            Some(&[Scalar::Integer(1), Scalar::Integer(2), Scalar::Integer(3)][..])
        );

        let stamp = root
            .scalar("Local")
            .and_then(Scalar::as_datetime)
            .and_then(|dt| dt.to_fixed())
            .expect("zoned date-time");
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset");
        assert_eq!(
            stamp,
            ist.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
                .single()
                .expect("unambiguous")
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_should_write_canonical_forms() {
        let doc = shipbind_xml::parse_str(SAMPLE_XML, &registry(), &BuildOptions::default())
            .expect("valid sample");
        assert_eq!(
            doc.to_xml(&compact()).expect("export"),
            concat!(
                "<Sample>",
                "<Count>42</Count>",
                "<Amount>12.5</Amount>",
                "<Ratio>1000</Ratio>",
                "<Flag>true</Flag>",
                "<Stamp>2024-03-01T10:00:00Z</Stamp>",
                "<Local>2024-03-01T10:00:00.25+05:30</Local>",
                "<Day>2024-02-29</Day>",
                "<At>23:59:59</At>",
                "<Blob>aGVsbG8=</Blob>",
                "<Codes>1 2 3</Codes>",
                "<Label>  padded  </Label>",
                "</Sample>"
            )
        );
    }

    #[test]
    fn test_should_keep_zone_naive_values_naive() {
        let doc = shipbind_xml::parse_str(
            "<Sample><Stamp>2024-03-01T10:00:00</Stamp></Sample>",
            &registry(),
            &BuildOptions::default(),
        )
        .expect("valid sample");
        let stamp = doc
            .root
            .scalar("Stamp")
            .and_then(Scalar::as_datetime)
            .expect("date-time");
        assert!(stamp.offset.is_none());
        assert!(stamp.to_fixed().is_none());
        assert_eq!(
            doc.to_xml(&compact()).expect("export"),
            "<Sample><Stamp>2024-03-01T10:00:00</Stamp></Sample>"
        );
    }

    #[test]
    fn test_should_fail_on_invalid_lexical_forms() {
        let cases = [
            ("<Sample>\n<Flag>yes</Flag></Sample>", "Sample/Flag", PrimitiveKind::Boolean),
            ("<Sample>\n<Day>2023-02-29</Day></Sample>", "Sample/Day", PrimitiveKind::Date),
            (
                "<Sample>\n<Stamp>2024-03-01T10:00:00+15:00</Stamp></Sample>",
                "Sample/Stamp",
                PrimitiveKind::DateTime,
            ),
            ("<Sample>\n<Codes>1 two</Codes></Sample>", "Sample/Codes", PrimitiveKind::Integer),
        ];
        for (xml, expected_path, expected_kind) in cases {
            let err = shipbind_xml::parse_str(xml, &registry(), &BuildOptions::default())
                .expect_err(xml);
            match err {
                XmlError::InvalidPrimitive {
                    path,
                    line,
                    expected,
                    ..
                } => {
                    assert_eq!(path, expected_path);
                    assert_eq!(line, Some(2));
                    assert_eq!(expected, expected_kind);
                }
                other => panic!("unexpected error for {xml}: {other}"),
            }
        }
    }

    #[test]
    fn test_should_treat_empty_numeric_elements_as_absent() {
        let doc = shipbind_xml::parse_str(
            "<Sample><Count/><Label/></Sample>",
            &registry(),
            &BuildOptions::default(),
        )
        .expect("valid sample");
        assert!(doc.root.get("Count").is_none());
        assert_eq!(doc.root.str_value("Label"), Some(""));
    }
}
