//! Lookup provider implementations.

pub mod brasilapi;
pub mod cnpja;
pub mod common;
pub mod datajud;
pub mod directdata;
pub mod duckduckgo;
pub mod github;
pub mod hibp;
pub mod local;
pub mod viacep;
pub mod wikipedia;

pub use brasilapi::DddProvider;
pub use cnpja::CnpjProvider;
pub use datajud::DatajudProvider;
pub use directdata::{DirectDataMethod, DirectDataProvider};
pub use duckduckgo::DuckDuckGoProvider;
pub use github::GithubProvider;
pub use hibp::HibpProvider;
pub use local::{CltPisProvider, CpfProvider, PhoneProvider};
pub use viacep::CepProvider;
pub use wikipedia::WikipediaProvider;
