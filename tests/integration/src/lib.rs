//! Integration tests for shipbind.
//!
//! These tests bind complete documents against the bundled Aramex schema and
//! small inline schemas, and check what comes back out.
//!
//! Run them with:
//! ```text
//! cargo test -p shipbind-integration
//! ```

use std::sync::Once;

use shipbind_xml::{BuildOptions, ParsedDocument, TypeRegistry, XmlResult};

#[cfg(test)]
mod test_codec;
#[cfg(test)]
mod test_diagnostics;
#[cfg(test)]
mod test_envelope;
#[cfg(test)]
mod test_mixed;
#[cfg(test)]
mod test_round_trip;
#[cfg(test)]
mod test_substitution;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Registry with every bundled carrier schema.
#[must_use]
pub fn aramex_registry() -> TypeRegistry {
    init_tracing();
    shipbind_schemas::registry()
}

/// Binds `xml` with the bundled schemas and default options.
pub fn parse_aramex(xml: &str) -> XmlResult<ParsedDocument> {
    shipbind_xml::parse_str(xml, &aramex_registry(), &BuildOptions::default())
}

/// Binds `xml` as `type_name` with the bundled schemas and default options.
pub fn parse_aramex_as(xml: &str, type_name: &str) -> XmlResult<ParsedDocument> {
    shipbind_xml::parse_str_as(xml, type_name, &aramex_registry(), &BuildOptions::default())
}

/// A complete rate request, formatted the way the exporter prints it.
pub const RATE_REQUEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RateCalculatorRequest xmlns="http://ws.aramex.net/ShippingAPI/v1/">
    <ClientInfo>
        <UserName>testingapi@aramex.com</UserName>
        <Password>R123456789$r</Password>
        <Version>v1.0</Version>
        <AccountNumber>20016</AccountNumber>
        <AccountPin>331421</AccountPin>
        <AccountEntity>AMM</AccountEntity>
        <AccountCountryCode>JO</AccountCountryCode>
    </ClientInfo>
    <Transaction>
        <Reference1>order-1001</Reference1>
    </Transaction>
    <OriginAddress>
        <Line1>Mecca St &amp; 7th Circle</Line1>
        <City>Amman</City>
        <CountryCode>JO</CountryCode>
    </OriginAddress>
    <DestinationAddress>
        <Line1>Sheikh Zayed Rd</Line1>
        <City>Dubai</City>
        <PostCode>00000</PostCode>
        <CountryCode>AE</CountryCode>
    </DestinationAddress>
    <ShipmentDetails>
        <Dimensions>
            <Length>30</Length>
            <Width>20</Width>
            <Height>10</Height>
            <Unit>CM</Unit>
        </Dimensions>
        <ActualWeight>
            <Unit>KG</Unit>
            <Value>2.5</Value>
        </ActualWeight>
        <NumberOfPieces>2</NumberOfPieces>
        <ProductGroup>EXP</ProductGroup>
        <ProductType>PPX</ProductType>
        <PaymentType>P</PaymentType>
        <Items>
            <ShipmentItem>
                <PackageType>Box</PackageType>
                <Quantity>1</Quantity>
                <Weight>
                    <Unit>KG</Unit>
                    <Value>1.5</Value>
                </Weight>
            </ShipmentItem>
            <ShipmentItem>
                <PackageType>Envelope</PackageType>
                <Quantity>1</Quantity>
                <Weight>
                    <Unit>KG</Unit>
                    <Value>1</Value>
                </Weight>
            </ShipmentItem>
        </Items>
    </ShipmentDetails>
</RateCalculatorRequest>
"#;

/// A rate reply carrying one notification.
pub const RATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RateCalculatorResponse xmlns="http://ws.aramex.net/ShippingAPI/v1/">
    <Transaction>
        <Reference1>order-1001</Reference1>
    </Transaction>
    <Notifications>
        <Notification>
            <Code>ERR52</Code>
            <Message>Destination city is not covered</Message>
        </Notification>
    </Notifications>
    <HasErrors>true</HasErrors>
    <TotalAmount>
        <CurrencyCode>JOD</CurrencyCode>
        <Value>12.75</Value>
    </TotalAmount>
</RateCalculatorResponse>
"#;
