#![allow(dead_code)]

use atelier_forms::{Form, FormConfig, RelayClient, SubmitStrategy};

pub const CONTACT_JSON: &str = r#"{
    "formConfig": {
        "title": "Contato",
        "description": "Conte um pouco sobre o seu evento",
        "fields": [
            {"fieldName": "nome", "label": "Nome", "isRequired": true, "width": "half",
             "displayOrder": 1, "validation": {"maxLength": 80}},
            {"fieldName": "email", "label": "E-mail", "fieldType": "email", "isRequired": true,
             "width": "half", "displayOrder": 2},
            {"fieldName": "celular", "label": "Celular", "fieldType": "phone", "displayOrder": 3},
            {"fieldName": "servico", "label": "Serviço", "fieldType": "select", "displayOrder": 4,
             "options": [
                {"value": "wedding", "label": "Casamento"},
                {"value": "portrait", "label": "Retrato"}
             ]},
            {"fieldName": "mensagem", "label": "Mensagem", "fieldType": "textarea",
             "displayOrder": 5, "validation": {"minLength": 10}}
        ],
        "submitSettings": {
            "buttonText": "Enviar mensagem",
            "emailTo": "contato@aofotografia.com",
            "subject": "Contato pelo site"
        }
    }
}"#;

pub fn contact_config() -> FormConfig {
    FormConfig::from_json(CONTACT_JSON)
        .unwrap_or_else(|e| panic!("Failed to parse contact config: {e}"))
}

pub fn relay_form(endpoint: &str) -> Form {
    let config = contact_config();
    let relay_config = config
        .relay_config(Some(endpoint))
        .expect("explicit endpoint is always accepted");
    let client = RelayClient::new(relay_config).expect("relay client builds");
    Form::from_config(&config, SubmitStrategy::Relay(client))
}

pub fn fill_valid(form: &mut Form) {
    form.change("nome", "Pedro Oliveira");
    form.change("email", "pedro@gmail.com");
    form.change("servico", "wedding");
}
