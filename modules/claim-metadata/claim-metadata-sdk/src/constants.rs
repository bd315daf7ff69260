//! Reserved URIs and legacy claim property keys.

/// URI of the tenant's canonical (local) claim dialect.
pub const LOCAL_CLAIM_DIALECT_URI: &str = "http://wso2.org/claims";

/// Legacy property keys recognised by [`ClaimProperties`](crate::ClaimProperties).
pub mod property {
    pub const DISPLAY_NAME: &str = "DisplayName";
    pub const DESCRIPTION: &str = "Description";
    pub const DISPLAY_ORDER: &str = "DisplayOrder";
    pub const REGULAR_EXPRESSION: &str = "RegEx";
    pub const SUPPORTED_BY_DEFAULT: &str = "SupportedByDefault";
    pub const REQUIRED: &str = "Required";
    pub const READ_ONLY: &str = "ReadOnly";
    pub const DEFAULT_ATTRIBUTE: &str = "DefaultAttribute";

    /// External claims name their local counterpart with this key in legacy config.
    pub const MAPPED_LOCAL_CLAIM: &str = "MappedLocalClaim";

    // Structural keys that legacy config repeats inside the property map.
    pub const DIALECT: &str = "Dialect";
    pub const CLAIM_URI: &str = "ClaimURI";
    pub const ATTRIBUTE_ID: &str = "AttributeID";
}

/// Display name assigned by the importer when legacy config does not provide one.
pub const DEFAULT_DISPLAY_NAME: &str = "0";
