//! Addresses and contact persons.

/// A postal address with contact details.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Given name of the addressee.
    pub first_name: String,
    /// Family name of the addressee.
    pub last_name: String,
    /// Contact email for this address.
    pub email: String,
    /// Street name.
    pub street: String,
    /// House or building number.
    pub street_number: String,
    /// Postal code.
    pub post_code: String,
    /// City or town.
    pub city: String,
    /// Optional region or state code.
    pub region_code: String,
    /// ISO country code.
    pub country_code: String,
    /// Contact phone number.
    pub telephone: String,
}

impl Address {
    /// Whether a non-empty email is present on this address.
    #[must_use]
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// The legal contact person for an order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    /// Address of the person, if distinct from the billing address.
    pub address: Option<Address>,
    /// Personal details required for some fulfilment workflows.
    pub personal_details: PersonalDetails,
    /// Set when the purchaser is an already-known customer.
    pub existing_customer_data: Option<ExistingCustomerData>,
}

/// Identity details of a purchaser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalDetails {
    /// Date of birth, as supplied by the purchaser.
    pub date_of_birth: String,
    /// Country that issued the passport.
    pub passport_country: String,
    /// Passport number.
    pub passport_number: String,
    /// Nationality of the purchaser.
    pub nationality: String,
}

/// Reference to an existing customer account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExistingCustomerData {
    /// Customer id in the external customer system.
    pub id: String,
}
