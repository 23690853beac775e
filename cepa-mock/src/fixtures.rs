use cepa_core::Address;

/// Fixture addresses keyed by normalized CEP.
pub fn by_cep(cep: &str) -> Option<Address> {
    match cep {
        "01001000" => Some(a(
            "01001-000",
            "Praça da Sé",
            "Sé",
            "São Paulo",
            "SP",
        )),
        "13335320" => Some(a(
            "13335-320",
            "Rua Sete de Setembro",
            "Centro",
            "Indaiatuba",
            "SP",
        )),
        "20040020" => Some(a(
            "20040-020",
            "Avenida Rio Branco",
            "Centro",
            "Rio de Janeiro",
            "RJ",
        )),
        "70040010" => Some(a(
            "70040-010",
            "Setor Bancário Norte Quadra 1",
            "Asa Norte",
            "Brasília",
            "DF",
        )),
        _ => None,
    }
}

fn a(cep: &str, street: &str, neighborhood: &str, city: &str, state: &str) -> Address {
    Address {
        provider: "Mock".to_string(),
        source: "mock".to_string(),
        cep: cep.to_string(),
        street: street.to_string(),
        neighborhood: neighborhood.to_string(),
        city: city.to_string(),
        state: state.to_string(),
    }
}
