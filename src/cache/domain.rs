//! Dominios de contenido cacheado
//!
//! Cada dominio define su prefijo de clave, su TTL y sus patterns de
//! invalidación. Los tres viven juntos para que los patterns nunca se
//! desincronicen de las claves que genera `keys::build_key`.

use serde::{Deserialize, Serialize};

/// Namespace raíz de todas las claves de la aplicación en Redis.
/// El cache nunca lee ni borra claves fuera de este namespace.
pub const CACHE_NAMESPACE: &str = "beatstore";

/// Dominios de contenido con política de cache propia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheDomain {
    Faq,
    Licenses,
    Privacy,
    Beats,
    Users,
    Admin,
    Temp,
}

impl CacheDomain {
    /// Segmento de dominio dentro de la clave
    pub fn segment(&self) -> &'static str {
        match self {
            CacheDomain::Faq => "faq",
            CacheDomain::Licenses => "licenses",
            CacheDomain::Privacy => "privacy",
            CacheDomain::Beats => "beats",
            CacheDomain::Users => "users",
            CacheDomain::Admin => "admin",
            CacheDomain::Temp => "temp",
        }
    }

    /// Prefijo completo de clave: `beatstore:<dominio>`
    pub fn prefix(&self) -> String {
        format!("{}:{}", CACHE_NAMESPACE, self.segment())
    }

    /// TTL en segundos según la frecuencia de cambio del contenido:
    /// licencias y privacidad casi estáticas (24h), FAQ semi-estática (12h),
    /// listados de beats y stats de admin dinámicos (minutos) y un bucket
    /// temporal de 1 minuto para valores ad hoc.
    pub fn ttl(&self) -> u64 {
        match self {
            CacheDomain::Licenses | CacheDomain::Privacy => 86_400, // 24 horas
            CacheDomain::Faq => 43_200,                             // 12 horas
            CacheDomain::Beats => 300,                              // 5 minutos
            CacheDomain::Users => 600,                              // 10 minutos
            CacheDomain::Admin => 180,                              // 3 minutos
            CacheDomain::Temp => 60,                                // 1 minuto
        }
    }

    /// Patrón glob que cubre todas las claves del dominio, incluida la
    /// clave sin parámetros que es exactamente el prefijo
    pub fn pattern(&self) -> String {
        format!("{}*", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_incluye_namespace() {
        assert_eq!(CacheDomain::Faq.prefix(), "beatstore:faq");
        assert_eq!(CacheDomain::Beats.prefix(), "beatstore:beats");
    }

    #[test]
    fn test_pattern_cubre_el_dominio() {
        assert_eq!(CacheDomain::Licenses.pattern(), "beatstore:licenses*");
    }

    #[test]
    fn test_ttl_por_frecuencia_de_cambio() {
        // contenido casi estático > semi-estático > dinámico > temporal
        assert!(CacheDomain::Licenses.ttl() > CacheDomain::Faq.ttl());
        assert!(CacheDomain::Faq.ttl() > CacheDomain::Users.ttl());
        assert!(CacheDomain::Users.ttl() > CacheDomain::Admin.ttl());
        assert!(CacheDomain::Admin.ttl() > CacheDomain::Temp.ttl());
    }
}
