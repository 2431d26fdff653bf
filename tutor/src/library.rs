use serde::Serialize;

const CIVIL_KEYWORDS: &[&str] = &["civil", "estática", "estructura", "hibbeler", "mecánica"];
const ADMIN_KEYWORDS: &[&str] = &["admin", "sistema", "configuración", "usuario"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fisica,
    Civil,
    Admin,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Fisica, Category::Civil, Category::Admin];

    pub fn label(self) -> &'static str {
        match self {
            Category::Fisica => "Biblioteca de Física (Tipler, Sears-Zemansky)",
            Category::Civil => "Biblioteca de Ingeniería Civil (Hibbeler)",
            Category::Admin => "Biblioteca de Administración",
        }
    }

    /// Routes a question by keyword membership. Civil is checked before admin;
    /// anything else falls through to physics.
    pub fn for_question(question: &str) -> Category {
        let lowered = question.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(*k));

        if mentions(CIVIL_KEYWORDS) {
            Category::Civil
        } else if mentions(ADMIN_KEYWORDS) {
            Category::Admin
        } else {
            Category::Fisica
        }
    }
}

/// Label used when a document id matches no category.
pub const FALLBACK_LABEL: &str = "Material de consulta";

/// Fixed category → document id mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    fisica: String,
    civil: String,
    admin: String,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(
            "1qtIP2Ms9Op_XapFr9sCK2CvTz_kfj0k9",
            "11vF9zTQcrPQl3Yu4udxaHVLCxeRzWk71",
            "1pKchzTFLqmNdGIZznVtejFhItz9yY98y",
        )
    }
}

impl Library {
    pub fn new(
        fisica: impl Into<String>,
        civil: impl Into<String>,
        admin: impl Into<String>,
    ) -> Self {
        Self {
            fisica: fisica.into(),
            civil: civil.into(),
            admin: admin.into(),
        }
    }

    pub fn id(&self, category: Category) -> &str {
        match category {
            Category::Fisica => &self.fisica,
            Category::Civil => &self.civil,
            Category::Admin => &self.admin,
        }
    }

    pub fn select(&self, question: &str) -> &str {
        self.id(Category::for_question(question))
    }

    pub fn category_of(&self, document_id: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.id(*category) == document_id)
    }

    pub fn label_for(&self, document_id: &str) -> &'static str {
        self.category_of(document_id)
            .map(Category::label)
            .unwrap_or(FALLBACK_LABEL)
    }

    pub fn is_configured(&self) -> bool {
        Category::ALL.iter().all(|c| !self.id(*c).is_empty())
    }
}
