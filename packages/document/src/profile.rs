use serde::{Deserialize, Serialize};

/// Lead data captured by the checkout flow.
///
/// Never persisted here; it is handed to a collaborator and/or appended to
/// the merchant redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutProfile {
    #[serde(alias = "nome_completo")]
    pub full_name: String,
    /// CPF
    #[serde(alias = "cpf")]
    pub tax_id: String,
    #[serde(alias = "data_nascimento")]
    pub birth_date: String,
    #[serde(alias = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(alias = "empresa", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(alias = "endereco_cep")]
    pub postal_code: String,
    #[serde(alias = "endereco_rua")]
    pub street: String,
    #[serde(alias = "endereco_numero")]
    pub number: String,
    #[serde(alias = "endereco_bairro")]
    pub district: String,
    #[serde(alias = "endereco_cidade")]
    pub city: String,
    #[serde(alias = "endereco_estado")]
    pub state: String,
}

impl CheckoutProfile {
    /// `(query key, value)` pairs in a stable order, empty values included
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", self.full_name.as_str()),
            ("tax_id", self.tax_id.as_str()),
            ("birth_date", self.birth_date.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("company", self.company.as_deref().unwrap_or("")),
            ("postal_code", self.postal_code.as_str()),
            ("street", self.street.as_str()),
            ("number", self.number.as_str()),
            ("district", self.district.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
        ]
    }
}
