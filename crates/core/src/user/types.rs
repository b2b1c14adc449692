use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record stored in the table.
///
/// The `id` is assigned once at creation and never changes. The
/// descriptive attributes are optional: a record's attribute set may
/// grow over time, and partial updates only touch the attributes the
/// caller mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserRecord {
    /// Creates a new record with a freshly generated identifier.
    ///
    /// The id is a random 128-bit UUID rendered in canonical form. It is
    /// never derived from the attribute values, so concurrent creators
    /// need no coordination to avoid collisions.
    pub fn create(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: Some(name.into()),
            address: Some(address.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    /// Creates an empty record with only the given id (useful for testing).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            address: None,
            email: None,
            phone: None,
        }
    }

    /// Sets the name for this record.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the address for this record.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the email for this record.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number for this record.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A partial update to a user record.
///
/// Each present field replaces that attribute; absent fields leave the
/// stored value untouched. This is a merge, never a full overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name to update.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the address to update.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the email to update.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number to update.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns true when the patch mentions no attribute at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }

    /// Applies the patch to an existing record.
    ///
    /// Only the mentioned attributes are replaced; the id is never
    /// touched.
    pub fn apply_to(&self, record: &mut UserRecord) {
        if let Some(name) = &self.name {
            record.name = Some(name.clone());
        }
        if let Some(address) = &self.address {
            record.address = Some(address.clone());
        }
        if let Some(email) = &self.email {
            record.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
    }
}
