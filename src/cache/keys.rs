//! Construcción de claves de cache
//!
//! Las claves son deterministas: el mismo dominio con los mismos parámetros
//! produce siempre la misma clave, sin importar el orden en que el caller
//! construyó el mapa. Las claves no se ofuscan, tienen que poder leerse
//! en los logs de Redis.

use super::domain::CacheDomain;

/// Construir una clave `beatstore:<dominio>[:k1:v1:k2:v2...]` con los
/// parámetros ordenados lexicográficamente por nombre. Un mapa vacío
/// omite el segmento de parámetros.
pub fn build_key(domain: CacheDomain, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return domain.prefix();
    }

    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let serialized = sorted
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(":");

    format!("{}:{}", domain.prefix(), serialized)
}

/// Clave del perfil de un usuario concreto
pub fn user_profile_key(user_id: &str) -> String {
    build_key(CacheDomain::Users, &[("id", user_id)])
}

/// Patrón que cubre todas las claves del perfil de un usuario concreto
pub fn user_profile_pattern(user_id: &str) -> String {
    format!("{}:id:{}*", CacheDomain::Users.prefix(), user_id)
}

/// Clave del detalle de un beat concreto
pub fn beat_detail_key(beat_id: &str) -> String {
    build_key(CacheDomain::Beats, &[("id", beat_id)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clave_determinista_sin_importar_orden() {
        let a = build_key(
            CacheDomain::Faq,
            &[("category", "licenses"), ("language", "es"), ("page", "2")],
        );
        let b = build_key(
            CacheDomain::Faq,
            &[("page", "2"), ("category", "licenses"), ("language", "es")],
        );
        assert_eq!(a, b);
        assert_eq!(a, "beatstore:faq:category:licenses:language:es:page:2");
    }

    #[test]
    fn test_mapas_distintos_producen_claves_distintas() {
        let base = build_key(CacheDomain::Faq, &[("category", "licenses")]);
        let otra_categoria = build_key(CacheDomain::Faq, &[("category", "payments")]);
        let otro_param = build_key(CacheDomain::Faq, &[("language", "licenses")]);
        let con_pagina = build_key(CacheDomain::Faq, &[("category", "licenses"), ("page", "1")]);

        assert_ne!(base, otra_categoria);
        assert_ne!(base, otro_param);
        assert_ne!(base, con_pagina);
    }

    #[test]
    fn test_mapa_vacio_omite_segmento() {
        let key = build_key(CacheDomain::Licenses, &[]);
        assert_eq!(key, "beatstore:licenses");

        let no_vacio = build_key(CacheDomain::Licenses, &[("language", "en")]);
        assert_ne!(key, no_vacio);
    }

    #[test]
    fn test_claves_de_entidades() {
        assert_eq!(beat_detail_key("1"), "beatstore:beats:id:1");
        assert_eq!(user_profile_key("42"), "beatstore:users:id:42");
        assert!(user_profile_pattern("42").starts_with("beatstore:users:id:42"));
    }
}
