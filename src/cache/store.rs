//! Backend de almacenamiento del cache
//!
//! El manager habla con el store remoto a través del trait `CacheStore`,
//! así el cliente real de Redis se inyecta en el arranque del proceso y
//! los tests usan un store en memoria sin levantar Redis.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;

/// Errores internos del cache. El manager los colapsa a miss/no-op en su
/// frontera pública; aquí se mantienen visibles para logs y contadores.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache command timed out after {0}ms")]
    Timeout(u64),
}

/// Operaciones crudas contra el store remoto de clave-valor
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Leer el valor serializado de una clave
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Escribir un valor serializado con expiración relativa en segundos
    async fn set_raw(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Borrar un lote de claves, devuelve cuántas existían
    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError>;

    /// Listar claves que matchean un patrón glob (`*` como comodín).
    /// Operación cara: los callers usan patterns acotados por dominio.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// Probar la conexión con el store
    async fn ping(&self) -> Result<(), CacheError>;
}

/// Store en memoria con expiración real, para tests y tooling local.
/// Implementa el mismo contrato que Redis incluyendo el matching glob
/// de `keys`, que es lo que ejercita la invalidación por patterns.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() >= expires_at,
            None => false,
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }

        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let expires_at = if ttl_seconds > 0 {
            Some(Instant::now() + Duration::from_secs(ttl_seconds))
        } else {
            None
        };

        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        let mut deleted = 0;

        for key in keys {
            if entries.remove(key).is_some() {
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, entry| !entry.is_expired());

        let mut matched: Vec<String> = entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        matched.sort();

        Ok(matched)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Store que falla todas las operaciones, simula un Redis caído.
/// Solo tiene sentido en tests del modo degradado.
pub struct FailingStore;

impl FailingStore {
    fn io_error() -> CacheError {
        CacheError::Backend(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "conexion rechazada",
        )))
    }
}

#[async_trait]
impl CacheStore for FailingStore {
    async fn get_raw(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(Self::io_error())
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<(), CacheError> {
        Err(Self::io_error())
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64, CacheError> {
        Err(Self::io_error())
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>, CacheError> {
        Err(Self::io_error())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(Self::io_error())
    }
}

/// Matching glob mínimo: solo `*` como comodín, igual que los patterns
/// de invalidación que genera `CacheDomain::pattern`.
fn glob_match(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let mut rest = key;

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }

        if i == 0 {
            match rest.strip_prefix(part) {
                Some(suffix) => rest = suffix,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_por_prefijo() {
        assert!(glob_match("beatstore:faq:*", "beatstore:faq:category:licenses"));
        assert!(glob_match("beatstore:*", "beatstore:beats:featured"));
        assert!(!glob_match("beatstore:faq:*", "beatstore:beats:featured"));
    }

    #[test]
    fn test_glob_match_exacto_sin_comodin() {
        assert!(glob_match("beatstore:faq", "beatstore:faq"));
        assert!(!glob_match("beatstore:faq", "beatstore:faq:extra"));
    }

    #[test]
    fn test_glob_match_comodin_intermedio() {
        assert!(glob_match("beatstore:users:*:42*", "beatstore:users:id:42"));
        assert!(!glob_match("beatstore:users:*:42*", "beatstore:users:id:7"));
    }

    #[tokio::test]
    async fn test_memory_store_expira_entradas() {
        let store = MemoryStore::new();
        store.set_raw("beatstore:temp:x", "\"v\"", 1).await.unwrap();
        assert!(store.get_raw("beatstore:temp:x").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(store.get_raw("beatstore:temp:x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_delete_cuenta_existentes() {
        let store = MemoryStore::new();
        store.set_raw("beatstore:temp:a", "1", 0).await.unwrap();
        store.set_raw("beatstore:temp:b", "2", 0).await.unwrap();

        let deleted = store
            .delete(&[
                "beatstore:temp:a".to_string(),
                "beatstore:temp:b".to_string(),
                "beatstore:temp:no-existe".to_string(),
            ])
            .await
            .unwrap();

        assert_eq!(deleted, 2);
    }
}
