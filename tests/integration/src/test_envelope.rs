//! SOAP wrapping of Aramex payloads, fault reading and the JSON view.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shipbind_xml::envelope::{self, SOAP11_NAMESPACE};
    use shipbind_xml::{BuildOptions, Element, ExportOptions, SoapVersion, WriteOptions};

    use crate::{RATE_REQUEST, RATE_RESPONSE, aramex_registry, parse_aramex};

    const COMPACT: WriteOptions = WriteOptions {
        pretty: false,
        xml_declaration: false,
    };

    const SOAP_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <RateCalculatorResponse xmlns="http://ws.aramex.net/ShippingAPI/v1/">
            <HasErrors>false</HasErrors>
            <TotalAmount>
                <CurrencyCode>JOD</CurrencyCode>
                <Value>8</Value>
            </TotalAmount>
        </RateCalculatorResponse>
    </s:Body>
</s:Envelope>"#;

    const SOAP_FAULT: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <s:Fault>
            <faultcode>s:Client</faultcode>
            <faultstring>The message could not be processed.</faultstring>
            <detail><ExceptionDetail><Message>Invalid AccountPin</Message></ExceptionDetail></detail>
        </s:Fault>
    </s:Body>
</s:Envelope>"#;

    #[test]
    fn test_should_wrap_request_in_envelope_and_read_it_back() {
        let doc = parse_aramex(RATE_REQUEST).expect("valid request");
        let options = ExportOptions {
            pretty: false,
            xml_declaration: false,
            namespaces: Some(doc.namespaces.clone()),
            ..ExportOptions::default()
        };
        let payload =
            shipbind_xml::to_element(&doc.root, None, None, &options).expect("lower request");
        let soap = envelope::create_envelope(payload, None, SoapVersion::Soap11, "soap");
        let xml = soap.to_xml_string(&COMPACT).expect("print envelope");
        assert!(xml.starts_with(concat!(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            "<soap:Header/><soap:Body>",
            r#"<RateCalculatorRequest xmlns="http://ws.aramex.net/ShippingAPI/v1/"><ClientInfo>"#
        )));
        assert!(xml.ends_with("</RateCalculatorRequest></soap:Body></soap:Envelope>"));

        let parsed = Element::parse_str(&xml).expect("well-formed envelope");
        assert_eq!(
            parsed.declared_namespace(Some("soap")),
            Some(SOAP11_NAMESPACE)
        );
        assert!(envelope::extract_fault(&parsed).is_none());
        let body = envelope::body_content(&parsed).expect("body payload");
        let again = shipbind_xml::parse_element(body, &aramex_registry(), &BuildOptions::default())
            .expect("bind payload");
        assert_eq!(again.root, doc.root);
        assert_eq!(again.root.line(), None);
    }

    #[test]
    fn test_should_unwrap_soap_reply() {
        let root = Element::parse_str(SOAP_REPLY).expect("well-formed envelope");
        let body = envelope::body_content(&root).expect("body payload");
        assert_eq!(body.local_name(), "RateCalculatorResponse");

        let doc = shipbind_xml::parse_element(body, &aramex_registry(), &BuildOptions::default())
            .expect("bind reply");
        assert!(doc.diagnostics.is_empty(), "{:?}", doc.diagnostics.messages());
        assert_eq!(doc.root.boolean("HasErrors"), Some(false));
        assert_eq!(
            doc.root.node("TotalAmount").and_then(|m| m.double("Value")),
            Some(8.0)
        );
    }

    #[test]
    fn test_should_extract_fault_from_reply() {
        let root = Element::parse_str(SOAP_FAULT).expect("well-formed envelope");
        let fault = envelope::extract_fault(&root).expect("fault present");
        assert_eq!(fault.version, SoapVersion::Soap11);
        assert_eq!(fault.code, "s:Client");
        assert_eq!(fault.reason, "The message could not be processed.");
        assert_eq!(
            fault.detail.as_deref(),
            Some("<ExceptionDetail><Message>Invalid AccountPin</Message></ExceptionDetail>")
        );
        assert_eq!(
            fault.to_string(),
            "SOAP 1.1 fault s:Client: The message could not be processed."
        );
    }

    #[test]
    fn test_should_render_reply_as_json() {
        let doc = parse_aramex(RATE_RESPONSE).expect("valid reply");
        assert_eq!(
            shipbind_xml::to_json(&doc.root),
            json!({
                "Transaction": { "Reference1": "order-1001" },
                "Notifications": {
                    "Notification": [
                        { "Code": "ERR52", "Message": "Destination city is not covered" }
                    ]
                },
                "HasErrors": true,
                "TotalAmount": { "CurrencyCode": "JOD", "Value": 12.75 }
            })
        );
    }
}
