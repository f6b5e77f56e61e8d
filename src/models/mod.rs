pub mod keyvault;
pub mod oauth;
