//! Typed upstream operations.
//!
//! Each operation pairs a fixed query document with the variables it takes
//! and the shape of the `data` it returns, so a field added to a query must
//! also be added to the response type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A GraphQL operation with typed variables and response data.
pub trait Operation {
    /// Operation name used in logs.
    const NAME: &'static str;
    /// Query document sent upstream.
    const QUERY: &'static str;

    type Variables: Serialize + Send + Sync;
    type Data: DeserializeOwned;
}

/// `{ page, limit }` pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

/// `{ eq: value }` string filter input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringFilter {
    pub eq: String,
}

impl StringFilter {
    pub fn eq(value: impl Into<String>) -> Self {
        Self { eq: value.into() }
    }
}

/// A page of records as returned by `list*` queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

// --- customers ---

pub struct ListCustomers;

#[derive(Debug, Clone, Serialize)]
pub struct ListCustomersVariables {
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StringFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersData {
    pub list_customer: Page<Customer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub order_count: Option<u64>,
    pub total_order_price: Option<f64>,
    #[serde(default)]
    pub attributes: Option<Vec<CustomerAttribute>>,
}

/// A custom attribute value on a customer.
///
/// `name` is never sent by the upstream; it is filled in from the
/// attribute catalog when the id is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAttribute {
    pub customer_attribute_id: String,
    pub value: Option<String>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Operation for ListCustomers {
    const NAME: &'static str = "GetCustomers";
    const QUERY: &'static str = r#"
query GetCustomers($pagination: PaginationInput, $search: String, $id: StringFilterInput) {
    listCustomer(pagination: $pagination, search: $search, id: $id) {
        data {
            id, firstName, lastName, email, phone, fullName, orderCount, totalOrderPrice,
            attributes { customerAttributeId, value }
        }
    }
}
"#;

    type Variables = ListCustomersVariables;
    type Data = ListCustomersData;
}

// --- orders ---

pub struct ListOrders;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersVariables {
    pub pagination: Pagination,
    pub customer_id: StringFilter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersData {
    pub list_order: Page<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: Option<String>,
    pub status: Option<String>,
    pub note: Option<String>,
    pub total_price: Option<f64>,
    pub total_final_price: Option<f64>,
    pub currency_code: Option<String>,
    pub ordered_at: Option<i64>,
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_methods: Option<Vec<PaymentMethod>>,
    #[serde(default)]
    pub shipping_lines: Option<Vec<ShippingLine>>,
    #[serde(default)]
    pub tax_lines: Option<Vec<TaxLine>>,
    #[serde(default)]
    pub order_adjustments: Option<Vec<OrderAdjustment>>,
    #[serde(default)]
    pub order_line_items: Option<Vec<OrderLineItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<NamedRef>,
    pub district: Option<NamedRef>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<f64>,
    pub payment_gateway_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingLine {
    pub title: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxLine {
    pub price: Option<f64>,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAdjustment {
    pub name: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: String,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub final_price: Option<f64>,
    pub variant: Option<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub variant_values: Option<Vec<VariantValue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantValue {
    pub variant_type_name: Option<String>,
    pub variant_value_name: Option<String>,
}

impl Operation for ListOrders {
    const NAME: &'static str = "GetOrders";
    const QUERY: &'static str = r#"
query GetOrders($pagination: PaginationInput, $customerId: StringFilterInput) {
    listOrder(pagination: $pagination, customerId: $customerId) {
        data {
            id, orderNumber, status, note, totalPrice, totalFinalPrice, currencyCode, orderedAt,
            shippingAddress { firstName, lastName, addressLine1, city { name }, district { name }, phone },
            paymentMethods { type, price, paymentGatewayName },
            shippingLines { title, price },
            taxLines { price, rate },
            orderAdjustments { name, amount, type },
            orderLineItems {
                id, quantity, price, finalPrice,
                variant { id, name, sku, variantValues { variantTypeName, variantValueName } }
            }
        }
    }
}
"#;

    type Variables = ListOrdersVariables;
    type Data = ListOrdersData;
}

// --- customer attributes ---

pub struct ListCustomerAttributes;

/// The attribute query takes no arguments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomerAttributesData {
    #[serde(default)]
    pub list_customer_attribute: Vec<CustomerAttributeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAttributeDefinition {
    pub id: String,
    pub name: String,
}

impl Operation for ListCustomerAttributes {
    const NAME: &'static str = "ListCustomerAttributes";
    const QUERY: &'static str = "{ listCustomerAttribute { id, name } }";

    type Variables = NoVariables;
    type Data = ListCustomerAttributesData;
}
