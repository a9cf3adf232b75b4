//! Domain registration and TLS certificate checks.
//!
//! 从任意 URL / 主机字符串中提取域名，并发执行 WHOIS 注册查询与 TLS 证书检查。
//! 两项检查互相独立：任一失败都只体现在各自的结果中。

mod error;
mod services;
mod traits;
mod types;

pub use error::{CheckerError, CheckerResult};
#[cfg(feature = "rustls")]
pub use services::TlsCertificateInspector;
pub use services::{
    normalize_domain, DomainChecker, WhoisOptions, WhoisRegistrationInspector, WHOIS_SERVERS,
};
pub use traits::{CertificateInspector, RegistrationInspector};
pub use types::{CertificateInfo, CheckOutcome, CombinedResult, RegistrationInfo};
