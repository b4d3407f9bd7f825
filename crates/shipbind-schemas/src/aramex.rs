//! Aramex rate calculator service (`ShippingAPI/v1`).

use shipbind_model::{Facets, FieldDescriptor, NodeSchema, SchemaSet, SimpleType};

/// Target namespace of the rate calculator messages.
pub const NAMESPACE: &str = "http://ws.aramex.net/ShippingAPI/v1/";

const COUNTRY_CODE: SimpleType = SimpleType::STRING.with_facets(Facets::length(Some(2), Some(2)));
const WEIGHT_UNIT: SimpleType = SimpleType::STRING.with_facets(Facets::enumeration(&["KG", "LB"]));
const PRODUCT_GROUP: SimpleType =
    SimpleType::STRING.with_facets(Facets::enumeration(&["EXP", "DOM"]));
const PAYMENT_TYPE: SimpleType =
    SimpleType::STRING.with_facets(Facets::enumeration(&["P", "C", "3"]));
const NON_NEGATIVE: Facets = Facets::range(Some(0.0), None);

/// Rate request envelope body.
pub static RATE_CALCULATOR_REQUEST: NodeSchema = NodeSchema::new(
    "RateCalculatorRequest",
    &[
        FieldDescriptor::node("ClientInfo", "ClientInfo").required(),
        FieldDescriptor::node("Transaction", "Transaction"),
        FieldDescriptor::node("OriginAddress", "Address").required(),
        FieldDescriptor::node("DestinationAddress", "Address").required(),
        FieldDescriptor::node("ShipmentDetails", "ShipmentDetails").required(),
    ],
);

/// Account credentials sent with every request.
pub static CLIENT_INFO: NodeSchema = NodeSchema::new(
    "ClientInfo",
    &[
        FieldDescriptor::simple("UserName", SimpleType::STRING).required(),
        FieldDescriptor::simple("Password", SimpleType::STRING).required(),
        FieldDescriptor::simple("Version", SimpleType::STRING).required(),
        FieldDescriptor::simple("AccountNumber", SimpleType::STRING).required(),
        FieldDescriptor::simple("AccountPin", SimpleType::STRING).required(),
        FieldDescriptor::simple("AccountEntity", SimpleType::STRING).required(),
        FieldDescriptor::simple("AccountCountryCode", COUNTRY_CODE).required(),
    ],
);

/// Free-form references echoed back in the response.
pub static TRANSACTION: NodeSchema = NodeSchema::new(
    "Transaction",
    &[
        FieldDescriptor::simple("Reference1", SimpleType::STRING),
        FieldDescriptor::simple("Reference2", SimpleType::STRING),
        FieldDescriptor::simple("Reference3", SimpleType::STRING),
        FieldDescriptor::simple("Reference4", SimpleType::STRING),
        FieldDescriptor::simple("Reference5", SimpleType::STRING),
    ],
);

/// Postal address of origin or destination.
pub static ADDRESS: NodeSchema = NodeSchema::new(
    "Address",
    &[
        FieldDescriptor::simple("Line1", SimpleType::STRING).required(),
        FieldDescriptor::simple("Line2", SimpleType::STRING),
        FieldDescriptor::simple("Line3", SimpleType::STRING),
        FieldDescriptor::simple("City", SimpleType::STRING).required(),
        FieldDescriptor::simple("StateOrProvinceCode", SimpleType::STRING),
        FieldDescriptor::simple("PostCode", SimpleType::STRING),
        FieldDescriptor::simple("CountryCode", COUNTRY_CODE).required(),
    ],
);

/// Parcel description, product and payment selection.
pub static SHIPMENT_DETAILS: NodeSchema = NodeSchema::new(
    "ShipmentDetails",
    &[
        FieldDescriptor::node("Dimensions", "Dimensions"),
        FieldDescriptor::node("ActualWeight", "Weight").required(),
        FieldDescriptor::node("ChargeableWeight", "Weight"),
        FieldDescriptor::simple("DescriptionOfGoods", SimpleType::STRING),
        FieldDescriptor::simple("GoodsOriginCountry", COUNTRY_CODE),
        FieldDescriptor::simple(
            "NumberOfPieces",
            SimpleType::INTEGER.with_facets(Facets::range(Some(1.0), None)),
        )
        .required(),
        FieldDescriptor::simple("ProductGroup", PRODUCT_GROUP).required(),
        FieldDescriptor::simple("ProductType", SimpleType::STRING).required(),
        FieldDescriptor::simple("PaymentType", PAYMENT_TYPE).required(),
        FieldDescriptor::simple("PaymentOptions", SimpleType::STRING),
        FieldDescriptor::node("CustomsValueAmount", "Money"),
        FieldDescriptor::node("CashOnDeliveryAmount", "Money"),
        FieldDescriptor::node("InsuranceAmount", "Money"),
        FieldDescriptor::node("CashAdditionalAmount", "Money"),
        FieldDescriptor::node("CollectAmount", "Money"),
        FieldDescriptor::simple("Services", SimpleType::STRING),
        FieldDescriptor::node("Items", "ArrayOfShipmentItem"),
    ],
);

/// Parcel dimensions.
pub static DIMENSIONS: NodeSchema = NodeSchema::new(
    "Dimensions",
    &[
        FieldDescriptor::simple("Length", SimpleType::INTEGER.with_facets(NON_NEGATIVE)).required(),
        FieldDescriptor::simple("Width", SimpleType::INTEGER.with_facets(NON_NEGATIVE)).required(),
        FieldDescriptor::simple("Height", SimpleType::INTEGER.with_facets(NON_NEGATIVE)).required(),
        FieldDescriptor::simple("Unit", SimpleType::STRING).required(),
    ],
);

/// Weight with its unit.
pub static WEIGHT: NodeSchema = NodeSchema::new(
    "Weight",
    &[
        FieldDescriptor::simple("Unit", WEIGHT_UNIT).required(),
        FieldDescriptor::simple("Value", SimpleType::DOUBLE.with_facets(NON_NEGATIVE)).required(),
    ],
);

/// Amount with its currency.
pub static MONEY: NodeSchema = NodeSchema::new(
    "Money",
    &[
        FieldDescriptor::simple("CurrencyCode", SimpleType::STRING).required(),
        FieldDescriptor::simple("Value", SimpleType::DOUBLE).required(),
    ],
);

/// Item list of a shipment.
pub static ARRAY_OF_SHIPMENT_ITEM: NodeSchema = NodeSchema::new(
    "ArrayOfShipmentItem",
    &[FieldDescriptor::node("ShipmentItem", "ShipmentItem").unbounded()],
);

/// One item of a shipment.
pub static SHIPMENT_ITEM: NodeSchema = NodeSchema::new(
    "ShipmentItem",
    &[
        FieldDescriptor::simple("PackageType", SimpleType::STRING).required(),
        FieldDescriptor::simple("Quantity", SimpleType::INTEGER).required(),
        FieldDescriptor::node("Weight", "Weight").required(),
        FieldDescriptor::simple("Comments", SimpleType::STRING),
        FieldDescriptor::simple("Reference", SimpleType::STRING),
    ],
);

/// Rate reply.
pub static RATE_CALCULATOR_RESPONSE: NodeSchema = NodeSchema::new(
    "RateCalculatorResponse",
    &[
        FieldDescriptor::node("Transaction", "Transaction"),
        FieldDescriptor::node("Notifications", "ArrayOfNotification"),
        FieldDescriptor::simple("HasErrors", SimpleType::BOOLEAN).required(),
        FieldDescriptor::node("TotalAmount", "Money"),
    ],
);

/// Notification list of a reply.
pub static ARRAY_OF_NOTIFICATION: NodeSchema = NodeSchema::new(
    "ArrayOfNotification",
    &[FieldDescriptor::node("Notification", "Notification").unbounded()],
);

/// An error or warning reported by the service.
pub static NOTIFICATION: NodeSchema = NodeSchema::new(
    "Notification",
    &[
        FieldDescriptor::simple("Code", SimpleType::STRING),
        FieldDescriptor::simple("Message", SimpleType::STRING),
    ],
);

/// Every type and global element of the rate calculator service.
pub static RATES: SchemaSet = SchemaSet {
    name: "aramex-rates",
    namespace: NAMESPACE,
    types: &[
        &RATE_CALCULATOR_REQUEST,
        &CLIENT_INFO,
        &TRANSACTION,
        &ADDRESS,
        &SHIPMENT_DETAILS,
        &DIMENSIONS,
        &WEIGHT,
        &MONEY,
        &ARRAY_OF_SHIPMENT_ITEM,
        &SHIPMENT_ITEM,
        &RATE_CALCULATOR_RESPONSE,
        &ARRAY_OF_NOTIFICATION,
        &NOTIFICATION,
    ],
    elements: &[
        ("RateCalculatorRequest", "RateCalculatorRequest"),
        ("RateCalculatorResponse", "RateCalculatorResponse"),
        ("ClientInfo", "ClientInfo"),
        ("Transaction", "Transaction"),
        ("Address", "Address"),
        ("ShipmentDetails", "ShipmentDetails"),
        ("Dimensions", "Dimensions"),
        ("Weight", "Weight"),
        ("Money", "Money"),
        ("ArrayOfShipmentItem", "ArrayOfShipmentItem"),
        ("ShipmentItem", "ShipmentItem"),
        ("ArrayOfNotification", "ArrayOfNotification"),
        ("Notification", "Notification"),
    ],
};
