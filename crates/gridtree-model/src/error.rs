use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("group name is empty")]
    EmptyGroupName,
    #[error("attribute name is empty")]
    EmptyAttributeName,
    #[error("domain name is empty")]
    EmptyDomainName,
}
