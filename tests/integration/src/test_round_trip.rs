//! Round-trip integration tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use shipbind_core::ShipBindConfig;
    use shipbind_model::{Scalar, Value};
    use shipbind_xml::{BuildOptions, ExportOptions};

    use crate::{RATE_REQUEST, RATE_RESPONSE, aramex_registry, parse_aramex, parse_aramex_as};

    fn compact() -> ExportOptions {
        ExportOptions {
            pretty: false,
            xml_declaration: false,
            ..ExportOptions::default()
        }
    }

    #[test]
    fn test_should_reproduce_rate_request_verbatim() {
        let doc = parse_aramex(RATE_REQUEST).expect("valid request");
        assert!(doc.diagnostics.is_empty(), "{:?}", doc.diagnostics.messages());

        let xml = doc.to_xml(&ExportOptions::default()).expect("export");
        assert_eq!(xml, RATE_REQUEST);
    }

    #[test]
    fn test_should_parse_request_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(RATE_REQUEST.as_bytes()).expect("write request");

        let doc =
            shipbind_xml::parse_file(file.path(), &aramex_registry(), &BuildOptions::default())
                .expect("valid request");
        assert_eq!(doc.root_tag, "RateCalculatorRequest");
        assert_eq!(doc.root.line(), Some(2));
        assert_eq!(
            doc.namespaces.default_namespace(),
            Some(shipbind_schemas::aramex::NAMESPACE)
        );
    }

    #[test]
    fn test_should_keep_blank_string_values() {
        let request = RATE_REQUEST.replace(
            "<Reference1>order-1001</Reference1>",
            "<Reference1>   </Reference1>",
        );
        let doc = parse_aramex(&request).expect("valid request");
        let transaction = doc.root.node("Transaction").expect("transaction");
        assert_eq!(transaction.str_value("Reference1"), Some("   "));

        let xml = doc.to_xml(&ExportOptions::default()).expect("export");
        assert_eq!(xml, request);
        let again = parse_aramex(&xml).expect("re-parse");
        assert_eq!(again.root, doc.root);
    }

    #[test]
    fn test_should_rebuild_an_equal_tree() {
        let doc = parse_aramex(RATE_REQUEST).expect("valid request");
        let xml = doc.to_xml(&compact()).expect("export");
        let again = parse_aramex(&xml).expect("re-parse");
        assert_eq!(again.root, doc.root);
        assert_eq!(again.namespaces, doc.namespaces);
    }

    #[test]
    fn test_should_navigate_typed_tree() {
        let doc = parse_aramex(RATE_REQUEST).expect("valid request");
        let details = doc.root.node("ShipmentDetails").expect("shipment details");
        assert_eq!(details.integer("NumberOfPieces"), Some(2));
        assert_eq!(
            details
                .node("ActualWeight")
                .and_then(|w| w.double("Value")),
            Some(2.5)
        );

        let items: Vec<_> = details
            .node("Items")
            .expect("items")
            .nodes("ShipmentItem")
            .map(|item| item.str_value("PackageType"))
            .collect();
        assert_eq!(items, [Some("Box"), Some("Envelope")]);

        let origin = doc.root.node("OriginAddress").expect("origin");
        assert_eq!(origin.type_name(), "Address");
        assert_eq!(origin.str_value("Line1"), Some("Mecca St & 7th Circle"));
        assert_eq!(origin.line(), Some(15));

        let id = origin.id().expect("built nodes have ids");
        assert_eq!(doc.lineage.path_of(id), "RateCalculatorRequest/OriginAddress");
        assert_eq!(doc.lineage.parent_of(id), doc.root.id());
    }

    #[test]
    fn test_should_reproduce_prefix_under_new_root_tag() {
        let xml = r#"<ns1:RateCalculatorResponse xmlns:ns1="http://ws.aramex.net/ShippingAPI/v1/"><ns1:HasErrors>false</ns1:HasErrors></ns1:RateCalculatorResponse>"#;
        let doc = parse_aramex(xml).expect("valid response");

        let options = ExportOptions {
            root_tag: Some("RateReply".to_owned()),
            ..compact()
        };
        assert_eq!(
            doc.to_xml(&options).expect("export"),
            r#"<ns1:RateReply xmlns:ns1="http://ws.aramex.net/ShippingAPI/v1/"><ns1:HasErrors>false</ns1:HasErrors></ns1:RateReply>"#
        );
    }

    #[test]
    fn test_should_drop_captured_prefixes_when_disabled() {
        let xml = r#"<ns1:RateCalculatorResponse xmlns:ns1="http://ws.aramex.net/ShippingAPI/v1/"><ns1:HasErrors>0</ns1:HasErrors></ns1:RateCalculatorResponse>"#;
        let doc = parse_aramex(xml).expect("valid response");

        let config = ShipBindConfig::from_lookup(|key| {
            (key == "SHIPBIND_USE_CAPTURED_PREFIXES").then(|| "false".to_owned())
        })
        .expect("valid config");
        let options = ExportOptions {
            pretty: false,
            xml_declaration: false,
            ..ExportOptions::from(&config)
        };
        assert_eq!(
            doc.to_xml(&options).expect("export"),
            r#"<RateCalculatorResponse xmlns:ns1="http://ws.aramex.net/ShippingAPI/v1/"><HasErrors>false</HasErrors></RateCalculatorResponse>"#
        );
    }

    #[test]
    fn test_should_edit_and_export_a_reply() {
        let mut doc =
            parse_aramex_as(RATE_RESPONSE, "RateCalculatorResponse").expect("valid reply");
        doc.root.set("HasErrors", false).expect("known field");
        doc.root.remove("Notifications");
        let total = doc.root.node_mut("TotalAmount").expect("total amount");
        total
            .replace_at("Value", 0, Value::from(Scalar::Double(99.0)))
            .expect("existing value");

        let xml = doc.to_xml(&compact()).expect("export");
        assert_eq!(
            xml,
            concat!(
                r#"<RateCalculatorResponse xmlns="http://ws.aramex.net/ShippingAPI/v1/">"#,
                "<Transaction><Reference1>order-1001</Reference1></Transaction>",
                "<HasErrors>false</HasErrors>",
                "<TotalAmount><CurrencyCode>JOD</CurrencyCode><Value>99</Value></TotalAmount>",
                "</RateCalculatorResponse>"
            )
        );
    }
}
