//! Soft diagnostics and fatal errors on Aramex payloads.

#[cfg(test)]
mod tests {
    use shipbind_model::PrimitiveKind;
    use shipbind_xml::{BuildOptions, ExportOptions, XmlError};

    use crate::{RATE_REQUEST, aramex_registry, parse_aramex, parse_aramex_as};

    fn compact() -> ExportOptions {
        ExportOptions {
            pretty: false,
            xml_declaration: false,
            ..ExportOptions::default()
        }
    }

    #[test]
    fn test_should_report_missing_required_field_once() {
        let doc = parse_aramex("<Address><Line1>Rainbow St</Line1><CountryCode>JO</CountryCode></Address>")
            .expect("missing fields are not fatal");
        assert_eq!(
            doc.diagnostics.messages(),
            ["City near line 1: required value is missing"]
        );
        assert!(doc.root.get("City").is_none());
    }

    #[test]
    fn test_should_omit_line_when_lines_are_disabled() {
        let options = BuildOptions {
            keep_source_lines: false,
        };
        let doc = shipbind_xml::parse_str(
            "<Address><Line1>Rainbow St</Line1><CountryCode>JO</CountryCode></Address>",
            &aramex_registry(),
            &options,
        )
        .expect("missing fields are not fatal");
        assert_eq!(doc.diagnostics.messages(), ["City: required value is missing"]);
        assert_eq!(doc.root.line(), None);
    }

    #[test]
    fn test_should_abort_on_malformed_number() {
        let xml = r"<ShipmentDetails>
    <ActualWeight><Unit>KG</Unit><Value>1</Value></ActualWeight>
    <NumberOfPieces>two</NumberOfPieces>
</ShipmentDetails>";
        let err = parse_aramex(xml).expect_err("pieces must be an integer");
        match &err {
            XmlError::InvalidPrimitive {
                path,
                line,
                expected,
                value,
                ..
            } => {
                assert_eq!(path, "ShipmentDetails/NumberOfPieces");
                assert_eq!(*line, Some(3));
                assert_eq!(*expected, PrimitiveKind::Integer);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(
            err.to_string()
                .starts_with(r#"invalid integer value "two" at ShipmentDetails/NumberOfPieces near line 3"#)
        );
    }

    #[test]
    fn test_should_tolerate_and_drop_unknown_children() {
        let doc = parse_aramex(
            "<Notification><Code>E1</Code><Severity>high</Severity><Message>m</Message></Notification>",
        )
        .expect("unknown children are ignored");
        assert!(doc.diagnostics.is_empty());
        assert_eq!(
            doc.to_xml(&compact()).expect("export"),
            "<Notification><Code>E1</Code><Message>m</Message></Notification>"
        );
    }

    #[test]
    fn test_should_warn_on_facet_violations() {
        let xml = RATE_REQUEST.replace(
            "<AccountCountryCode>JO</AccountCountryCode>",
            "<AccountCountryCode>JOR</AccountCountryCode>",
        );
        let doc = parse_aramex(&xml).expect("facet violations are not fatal");
        assert_eq!(
            doc.diagnostics.messages(),
            [r#"AccountCountryCode near line 10: value "JOR" has length 3, greater than maximum length 2"#]
        );
        assert_eq!(
            doc.root
                .node("ClientInfo")
                .and_then(|c| c.str_value("AccountCountryCode")),
            Some("JOR")
        );
    }

    #[test]
    fn test_should_collect_warnings_in_document_order() {
        let xml = RATE_REQUEST
            .replace("        <City>Amman</City>\n", "")
            .replace(
                "<ProductGroup>EXP</ProductGroup>",
                "<ProductGroup>XXX</ProductGroup>",
            );
        let doc = parse_aramex(&xml).expect("warnings are not fatal");
        assert_eq!(
            doc.diagnostics.messages(),
            [
                "City near line 15: required value is missing",
                r#"ProductGroup near line 37: value "XXX" does not match enumeration restriction [EXP, DOM]"#,
            ]
        );
    }

    #[test]
    fn test_should_report_too_many_values() {
        let doc = parse_aramex_as(
            "<Item><PackageType>Box</PackageType><Quantity>1</Quantity>\
             <Weight><Unit>KG</Unit><Value>1</Value></Weight>\
             <Weight><Unit>KG</Unit><Value>2</Value></Weight></Item>",
            "ShipmentItem",
        )
        .expect("extra values are not fatal");
        assert_eq!(
            doc.diagnostics.messages(),
            ["Weight near line 1: number of values is above the maximum allowed, expected at most 1, found 2"]
        );
        assert_eq!(doc.root.count("Weight"), 2);
    }

    #[test]
    fn test_should_reject_malformed_markup_with_line() {
        let err = parse_aramex("<Address>\n<City>Amman</Town>\n</Address>")
            .expect_err("mismatched tags");
        assert!(matches!(err, XmlError::MalformedDocument { line: 2, .. }), "{err}");
    }
}
