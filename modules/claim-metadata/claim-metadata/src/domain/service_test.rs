#[cfg(test)]
mod tests {
    use super::super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use claim_metadata_sdk::{
        AttributeMapping, ClaimProperties, Dialect, ExternalClaim, ListenerDecision, LocalClaim,
        ResolutionListener, TenantId,
    };
    use uuid::Uuid;

    use crate::config::CacheConfig;
    use crate::infra::storage::ClaimRepositories;

    const SAML: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:basic";
    const OIDC: &str = "http://wso2.org/oidc/claim";
    const EMAIL: &str = "http://wso2.org/claims/emailaddress";
    const GIVEN_NAME: &str = "http://wso2.org/claims/givenname";

    struct Fixture {
        tenant: TenantId,
        repos: ClaimRepositories,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Self {
                tenant: Uuid::new_v4(),
                repos: ClaimRepositories::in_memory(&CacheConfig::default()),
            };
            fixture
                .repos
                .direct
                .dialects
                .add(&Dialect::local(), fixture.tenant)
                .unwrap();
            fixture
        }

        fn local(&self, claim: LocalClaim) -> &Self {
            self.repos.direct.local_claims.add(&claim, self.tenant).unwrap();
            self
        }

        fn external(&self, dialect: &str, claim_uri: &str, local_uri: &str) -> &Self {
            if !self
                .repos
                .direct
                .dialects
                .list(self.tenant)
                .unwrap()
                .iter()
                .any(|d| d.uri == dialect)
            {
                self.repos
                    .direct
                    .dialects
                    .add(&Dialect::new(dialect), self.tenant)
                    .unwrap();
            }
            self.repos
                .direct
                .external_claims
                .add(
                    &ExternalClaim::new(dialect, claim_uri, local_uri, ClaimProperties::default()),
                    self.tenant,
                )
                .unwrap();
            self
        }

        fn service(&self) -> service::Service {
            self.service_with(Vec::new())
        }

        fn service_with(&self, listeners: Vec<Arc<dyn ResolutionListener>>) -> service::Service {
            service::Service::new(
                self.tenant,
                self.repos.cached.clone(),
                Arc::new(ports::StaticRealmConfiguration::new("PRIMARY")),
                listeners,
            )
        }
    }

    fn email_claim() -> LocalClaim {
        LocalClaim::new(EMAIL, ClaimProperties::default())
            .with_attribute_mapping(AttributeMapping::new("PRIMARY", "mail"))
            .with_attribute_mapping(AttributeMapping::new("LDAP", "email"))
    }

    fn given_name_claim() -> LocalClaim {
        let props = ClaimProperties {
            required: Some(true),
            ..ClaimProperties::default()
        };
        LocalClaim::new(GIVEN_NAME, props)
            .with_attribute_mapping(AttributeMapping::new("PRIMARY", "givenName"))
    }

    struct StopAll {
        calls: AtomicUsize,
    }

    impl ResolutionListener for StopAll {
        fn before_get_all_claim_uris(&self) -> ListenerDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ListenerDecision::Stop
        }

        fn before_get_attribute_name(&self, _domain: &str, _claim_uri: &str) -> ListenerDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ListenerDecision::Stop
        }
    }

    struct PassThrough;

    impl ResolutionListener for PassThrough {}

    #[test]
    fn test_direct_domain_mapping() {
        let fx = Fixture::new();
        fx.local(email_claim());
        let service = fx.service();

        assert_eq!(
            service.resolve_attribute_name(Some("LDAP"), EMAIL).unwrap(),
            Some("email".to_owned())
        );
        assert_eq!(
            service
                .resolve_attribute_name(Some("ldap"), &EMAIL.to_uppercase())
                .unwrap(),
            Some("email".to_owned())
        );
    }

    #[test]
    fn test_default_attribute_wins_over_primary_domain() {
        let fx = Fixture::new();
        let props = ClaimProperties {
            default_attribute: Some("uid".to_owned()),
            ..ClaimProperties::default()
        };
        fx.local(
            LocalClaim::new("http://wso2.org/claims/username", props)
                .with_attribute_mapping(AttributeMapping::new("PRIMARY", "cn")),
        );

        let attr = fx
            .service()
            .resolve_attribute_name(Some("AD"), "http://wso2.org/claims/username")
            .unwrap();
        assert_eq!(attr.as_deref(), Some("uid"));
    }

    #[test]
    fn test_primary_domain_fallback() {
        let fx = Fixture::new();
        fx.local(email_claim());

        let attr = fx
            .service()
            .resolve_attribute_name(Some("AD"), EMAIL)
            .unwrap();
        assert_eq!(attr.as_deref(), Some("mail"));
    }

    #[test]
    fn test_exhausted_fallback_is_an_error() {
        let fx = Fixture::new();
        fx.local(
            LocalClaim::new("http://wso2.org/claims/role", ClaimProperties::default())
                .with_attribute_mapping(AttributeMapping::new("LDAP", "memberOf")),
        );
        let service = fx.service();

        for _ in 0..2 {
            let err = service
                .resolve_attribute_name(Some("AD"), "http://wso2.org/claims/role")
                .unwrap_err();
            assert!(matches!(
                err,
                error::DomainError::NoMappedAttribute { ref claim_uri } if claim_uri == "http://wso2.org/claims/role"
            ));
        }
    }

    #[test]
    fn test_unknown_claim_is_none() {
        let fx = Fixture::new();
        fx.local(email_claim());

        assert_eq!(
            fx.service()
                .resolve_attribute_name(Some("PRIMARY"), "http://wso2.org/claims/unknown")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_blank_arguments_rejected() {
        let fx = Fixture::new();
        let service = fx.service();

        assert!(
            service
                .resolve_attribute_name(Some(" "), EMAIL)
                .unwrap_err()
                .is_caller_error()
        );
        assert!(
            service
                .resolve_attribute_name(Some("PRIMARY"), "")
                .unwrap_err()
                .is_caller_error()
        );
        assert!(
            service
                .resolve_attribute_name(None, "  ")
                .unwrap_err()
                .is_caller_error()
        );
    }

    #[test]
    fn test_none_domain_uses_tenant_primary_domain() {
        let fx = Fixture::new();
        fx.local(email_claim());
        let service = service::Service::new(
            fx.tenant,
            fx.repos.cached.clone(),
            Arc::new(ports::StaticRealmConfiguration::new("PRIMARY").with_tenant(fx.tenant, "LDAP")),
            Vec::new(),
        );

        assert_eq!(
            service.resolve_attribute_name(None, EMAIL).unwrap().as_deref(),
            Some("email")
        );
    }

    #[test]
    fn test_external_claim_bridges_to_local() {
        let fx = Fixture::new();
        fx.local(email_claim())
            .local(given_name_claim())
            .external(SAML, "email", EMAIL)
            .external(OIDC, "given_name", GIVEN_NAME);
        let service = fx.service();

        for domain in ["PRIMARY", "LDAP", "AD"] {
            assert_eq!(
                service.resolve_attribute_name(Some(domain), "email").unwrap(),
                service.resolve_attribute_name(Some(domain), EMAIL).unwrap()
            );
            assert_eq!(
                service.resolve_attribute_name(Some(domain), "given_name").unwrap(),
                service.resolve_attribute_name(Some(domain), GIVEN_NAME).unwrap()
            );
        }
    }

    #[test]
    fn test_external_claim_with_missing_local_is_none() {
        let fx = Fixture::new();
        fx.local(email_claim())
            .external(SAML, "phone", "http://wso2.org/claims/mobile");

        assert_eq!(
            fx.service()
                .resolve_attribute_name(Some("PRIMARY"), "phone")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_listener_stop_short_circuits() {
        let fx = Fixture::new();
        fx.local(email_claim());
        let stop = Arc::new(StopAll {
            calls: AtomicUsize::new(0),
        });
        let service = fx.service_with(vec![Arc::new(PassThrough), stop.clone()]);

        assert_eq!(service.resolve_attribute_name(Some("PRIMARY"), EMAIL).unwrap(), None);
        assert_eq!(service.all_claim_uris().unwrap(), None);
        assert_eq!(stop.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_not_consulted_for_blank_input() {
        let fx = Fixture::new();
        let stop = Arc::new(StopAll {
            calls: AtomicUsize::new(0),
        });
        let service = fx.service_with(vec![stop.clone()]);

        assert!(service.resolve_attribute_name(Some(""), EMAIL).is_err());
        assert_eq!(stop.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_claim_uris_in_repository_order() {
        let fx = Fixture::new();
        fx.local(given_name_claim()).local(email_claim());

        assert_eq!(
            fx.service().all_claim_uris().unwrap(),
            Some(vec![GIVEN_NAME.to_owned(), EMAIL.to_owned()])
        );
    }

    #[test]
    fn test_get_claim_correlates_external_claim() {
        let fx = Fixture::new();
        fx.local(email_claim())
            .local(given_name_claim())
            .external(OIDC, "given_name", GIVEN_NAME);
        let service = fx.service();

        let claim = service.get_claim("given_name").unwrap().unwrap();
        assert_eq!(claim.claim_uri, GIVEN_NAME);
        assert!(claim.required);

        let mapping = service.get_claim_mapping("GIVEN_NAME").unwrap().unwrap();
        assert_eq!(mapping.mapped_attribute.as_deref(), Some("givenName"));

        assert!(service.get_claim("family_name").unwrap().is_none());
    }

    #[test]
    fn test_get_all_claim_mappings_by_dialect() {
        let fx = Fixture::new();
        fx.local(email_claim())
            .local(given_name_claim())
            .external(SAML, "email", EMAIL);
        let service = fx.service();

        let local = service.get_all_claim_mappings(None).unwrap();
        assert_eq!(local.len(), 2);
        assert_eq!(
            service
                .get_all_claim_mappings(Some("HTTP://WSO2.ORG/CLAIMS"))
                .unwrap(),
            local
        );

        let saml = service.get_all_claim_mappings(Some(SAML)).unwrap();
        assert_eq!(saml.len(), 1);
        assert_eq!(saml[0].claim.claim_uri, "email");
        assert_eq!(saml[0].claim.dialect_uri, SAML);
        assert_eq!(saml[0].mapped_attribute.as_deref(), Some("mail"));

        assert!(service.get_all_claim_mappings(Some(OIDC)).unwrap().is_empty());
    }

    #[test]
    fn test_flag_filters() {
        let fx = Fixture::new();
        let supported = ClaimProperties {
            supported_by_default: Some(true),
            ..ClaimProperties::default()
        };
        fx.local(email_claim())
            .local(given_name_claim())
            .local(LocalClaim::new("http://wso2.org/claims/country", supported));
        let service = fx.service();

        let required = service.get_required_mappings().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].claim.claim_uri, GIVEN_NAME);

        let by_default = service.get_supported_by_default_mappings().unwrap();
        assert_eq!(by_default.len(), 1);
        assert_eq!(by_default[0].claim.claim_uri, "http://wso2.org/claims/country");
    }

    #[test]
    fn test_storage_error_propagates() {
        struct Broken;

        impl repo::LocalClaimRepository for Broken {
            fn list(&self, _tenant_id: TenantId) -> Result<Vec<LocalClaim>, error::DomainError> {
                Err(error::DomainError::storage("database unavailable"))
            }

            fn add(&self, _claim: &LocalClaim, _tenant_id: TenantId) -> Result<(), error::DomainError> {
                Err(error::DomainError::storage("database unavailable"))
            }
        }

        let fx = Fixture::new();
        let mut repos = fx.repos.cached.clone();
        repos.local_claims = Arc::new(Broken);
        let service = service::Service::new(
            fx.tenant,
            repos,
            Arc::new(ports::StaticRealmConfiguration::new("PRIMARY")),
            Vec::new(),
        );

        let err = service.resolve_attribute_name(Some("PRIMARY"), EMAIL).unwrap_err();
        assert!(matches!(err, error::DomainError::Storage(ref m) if m == "database unavailable"));
        assert!(service.all_claim_uris().is_err());
    }
}
