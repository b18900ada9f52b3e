//! Shops (tenants) and their directory.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use shopledger_core::{DomainError, DomainResult, Entity, IdSequence, ShopId};

const WHATSAPP_BASE_URL: &str = "https://wa.me/";
const WHATSAPP_GREETING: &str = "Bonjour je veux plus d'information sur ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub active: bool,
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Shop {
    type Id = ShopId;

    fn id(&self) -> ShopId {
        self.id
    }
}

/// Build a WhatsApp click-to-chat link asking about `product_name`.
///
/// Spaces, dashes and parentheses are dropped from the number; the message
/// is form-urlencoded.
pub fn whatsapp_link(number: &str, product_name: &str) -> String {
    let digits: String = number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let message = format!("{WHATSAPP_GREETING}{product_name}");
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("{WHATSAPP_BASE_URL}{digits}?text={text}")
}

#[derive(Debug, Default)]
struct ShopState {
    shops: Vec<Shop>,
    ids: IdSequence,
}

/// In-memory shop directory.
#[derive(Debug, Default)]
pub struct ShopDirectory {
    inner: RwLock<ShopState>,
}

impl ShopDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, name: &str, whatsapp_number: &str) -> DomainResult<Shop> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid("shop name is required"));
        }

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let shop = Shop {
            id: ShopId::new(state.ids.advance()),
            name: name.trim().to_string(),
            active: true,
            whatsapp_number: whatsapp_number.trim().to_string(),
            created_at: Utc::now(),
        };
        state.shops.push(shop.clone());

        tracing::info!(shop_id = %shop.id, name = %shop.name, "shop created");
        Ok(shop)
    }

    pub fn get(&self, id: ShopId) -> DomainResult<Shop> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state
            .shops
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(DomainError::NotFound("shop"))
    }

    pub fn exists(&self, id: ShopId) -> bool {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.shops.iter().any(|s| s.id == id)
    }

    pub fn list(&self) -> Vec<Shop> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.shops.clone()
    }

    pub fn update_whatsapp(&self, id: ShopId, number: &str) -> DomainResult<Shop> {
        let number = number.trim();
        if number.is_empty() {
            return Err(DomainError::invalid("whatsapp number is required"));
        }

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let shop = state
            .shops
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::NotFound("shop"))?;
        shop.whatsapp_number = number.to_string();

        tracing::info!(shop_id = %id, "shop whatsapp number updated");
        Ok(shop.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_strips_separators_and_encodes_message() {
        assert_eq!(
            whatsapp_link("(212) 600-000-002", "Samsung Galaxy S23"),
            "https://wa.me/212600000002?text=Bonjour+je+veux+plus+d%27information+sur+Samsung+Galaxy+S23"
        );
    }

    #[test]
    fn link_encodes_reserved_characters_in_the_name() {
        let link = whatsapp_link("1", "A&B=C?");
        assert!(link.ends_with("sur+A%26B%3DC%3F"));
    }

    #[test]
    fn directory_assigns_ids_and_looks_up() {
        let dir = ShopDirectory::new();
        let a = dir.create("TechStore Casablanca", "212600000001").unwrap();
        let b = dir.create("ElectroShop Rabat", "212600000002").unwrap();

        assert_eq!(a.id, ShopId::new(1));
        assert_eq!(b.id, ShopId::new(2));
        assert!(a.active);
        assert_eq!(dir.get(b.id).unwrap().name, "ElectroShop Rabat");
        assert!(dir.exists(a.id));
        assert!(!dir.exists(ShopId::new(3)));
        assert_eq!(dir.get(ShopId::new(3)).unwrap_err(), DomainError::NotFound("shop"));
        assert_eq!(dir.list().len(), 2);
    }

    #[test]
    fn whatsapp_update_validates_and_persists() {
        let dir = ShopDirectory::new();
        let shop = dir.create("TechStore Casablanca", "212600000001").unwrap();

        assert!(matches!(
            dir.update_whatsapp(shop.id, "  "),
            Err(DomainError::InvalidInput(_))
        ));
        assert_eq!(
            dir.update_whatsapp(ShopId::new(9), "1").unwrap_err(),
            DomainError::NotFound("shop")
        );

        let updated = dir.update_whatsapp(shop.id, "212611111111").unwrap();
        assert_eq!(updated.whatsapp_number, "212611111111");
        assert_eq!(dir.get(shop.id).unwrap().whatsapp_number, "212611111111");
    }

    #[test]
    fn empty_name_is_rejected() {
        let dir = ShopDirectory::new();
        assert!(matches!(dir.create(" ", "1"), Err(DomainError::InvalidInput(_))));
        assert!(dir.list().is_empty());
    }
}
