use crate::error::SearchError;
use std::str::FromStr;

/// Keys of the log messages the search builder emits
pub mod keys {
    pub const QUERY_ERROR: &str = "query_error";
    pub const FUNCTION_QUERY_ERROR: &str = "function_query_error";
    pub const REQUEST_BODY: &str = "request_body";
    pub const FUNCTION_REQUEST_BODY: &str = "function_request_body";
    pub const DOCUMENT_NOT_FOUND: &str = "document_not_found";
    pub const GET_BY_ID_ERROR: &str = "get_by_id_error";
    pub const DELETE_BY_ID_ERROR: &str = "delete_by_id_error";
    pub const DELETE_ERROR: &str = "delete_error";
}

const EN_US: &[(&str, &str)] = &[
    (
        keys::QUERY_ERROR,
        "There was an error when querying the search engine. Query sent: ",
    ),
    (
        keys::FUNCTION_QUERY_ERROR,
        "There was an error when querying the search engine with functions. Query sent: ",
    ),
    (keys::REQUEST_BODY, "JSON: "),
    (keys::FUNCTION_REQUEST_BODY, "JSON (FunctionScore): "),
    (keys::DOCUMENT_NOT_FOUND, "Object not found #"),
    (keys::GET_BY_ID_ERROR, "There was an error on getById "),
    (keys::DELETE_BY_ID_ERROR, "There was an error on deleteById "),
    (
        keys::DELETE_ERROR,
        "There was an error when deleting by query. Query sent: ",
    ),
];

const PT_BR: &[(&str, &str)] = &[
    (
        keys::QUERY_ERROR,
        "Ocorreu um erro ao consultar o motor de busca. Consulta enviada: ",
    ),
    (
        keys::FUNCTION_QUERY_ERROR,
        "Ocorreu um erro ao consultar o motor de busca com funções. Consulta enviada: ",
    ),
    (keys::REQUEST_BODY, "JSON: "),
    (keys::FUNCTION_REQUEST_BODY, "JSON (FunctionScore): "),
    (keys::DOCUMENT_NOT_FOUND, "Objeto não encontrado #"),
    (keys::GET_BY_ID_ERROR, "Ocorreu um erro no getById "),
    (keys::DELETE_BY_ID_ERROR, "Ocorreu um erro no deleteById "),
    (
        keys::DELETE_ERROR,
        "Ocorreu um erro ao remover por consulta. Consulta enviada: ",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    PtBr,
}

impl FromStr for Locale {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en-us" => Ok(Locale::EnUs),
            "pt-br" => Ok(Locale::PtBr),
            _ => Err(SearchError::Configuration(format!(
                "Unsupported locale: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::EnUs => write!(f, "en-us"),
            Locale::PtBr => write!(f, "pt-br"),
        }
    }
}

/// Localized log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
    table: &'static [(&'static str, &'static str)],
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        let table = match locale {
            Locale::EnUs => EN_US,
            Locale::PtBr => PT_BR,
        };
        Self { locale, table }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: &str) -> Result<&'static str, SearchError> {
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, message)| *message)
            .ok_or_else(|| {
                SearchError::Configuration(format!(
                    "Missing message '{}' for locale {}",
                    key, self.locale
                ))
            })
    }
}
