//! Student record and field payload types.

use serde::{Deserialize, Serialize};

use crate::types::{Field, RecordId};

/// Fully materialized, stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable record identifier.
    pub id: RecordId,
    /// Student name.
    pub name: String,
    /// Student ID, unique across the roster.
    pub sid: String,
    /// Email address.
    pub email: String,
    /// Ten-digit contact number.
    pub contact: String,
}

impl StudentRecord {
    /// Copies the non-id fields out of this record.
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            sid: self.sid.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
        }
    }

    /// Replaces every non-id field in place.
    pub fn apply(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.sid = fields.sid;
        self.email = fields.email;
        self.contact = fields.contact;
    }
}

/// Add/update payload: every field except the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentFields {
    /// Student name.
    pub name: String,
    /// Student ID.
    pub sid: String,
    /// Email address.
    pub email: String,
    /// Contact number.
    pub contact: String,
}

impl StudentFields {
    /// Builds a payload from borrowed strings.
    pub fn new(name: &str, sid: &str, email: &str, contact: &str) -> Self {
        Self {
            name: name.to_string(),
            sid: sid.to_string(),
            email: email.to_string(),
            contact: contact.to_string(),
        }
    }

    /// Borrows the value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Sid => &self.sid,
            Field::Email => &self.email,
            Field::Contact => &self.contact,
        }
    }

    /// Mutable access to the value of `field`.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Sid => &mut self.sid,
            Field::Email => &mut self.email,
            Field::Contact => &mut self.contact,
        }
    }

    /// Returns a copy with every value trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            sid: self.sid.trim().to_string(),
            email: self.email.trim().to_string(),
            contact: self.contact.trim().to_string(),
        }
    }

    pub(crate) fn into_record(self, id: RecordId) -> StudentRecord {
        StudentRecord {
            id,
            name: self.name,
            sid: self.sid,
            email: self.email,
            contact: self.contact,
        }
    }
}
