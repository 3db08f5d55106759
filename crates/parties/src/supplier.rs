use serde::{Deserialize, Serialize};

use stockroom_core::SupplierId;

/// A supplier, identified by its id.
///
/// Suppliers are replaced wholesale on update; there is no partial edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    supplier_id: SupplierId,
    name: String,
    email: String,
}

impl Supplier {
    pub fn new(supplier_id: SupplierId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            supplier_id,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppliers_with_the_same_id_are_the_same_entity() {
        let a = Supplier::new(SupplierId::new(1), "Acme", "a@x.com");
        let b = Supplier::new(SupplierId::new(1), "Acme Corp", "b@x.com");
        assert_eq!(a.supplier_id(), b.supplier_id());
        assert_ne!(a, b);
        assert_eq!(b.name(), "Acme Corp");
        assert_eq!(b.email(), "b@x.com");
    }
}
