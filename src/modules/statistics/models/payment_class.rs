use serde::Serialize;

use crate::modules::analytics::services::aggregation::ClassificationTable;

/// Payment form recorded for cash passages
pub const CASH: &str = "EFEC.";

/// Electronic tag discount tiers, in reporting order
pub const TAG_TYPES: [&str; 3] = ["RFID 0 %", "RFID 50 %", "RFID 100 %"];

/// Coarse payment-method class used when folding lanes by payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentClass {
    Cash,
    ElectronicToll,
    Exempt,
}

/// `EFEC.` is cash, anything starting with `RFID` is an electronic tag,
/// every other payment form is an exemption
pub fn payment_classes() -> ClassificationTable<PaymentClass> {
    ClassificationTable::new(PaymentClass::Exempt)
        .exact(CASH, PaymentClass::Cash)
        .prefix("RFID", PaymentClass::ElectronicToll)
}
