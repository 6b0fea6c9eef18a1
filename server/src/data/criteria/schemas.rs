//! Filterable field tables for each entity

use super::types::{EntitySchema, FieldDef, FieldKind};

pub static AUTHOR: EntitySchema = EntitySchema {
    entity: "author",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer),
        FieldDef::new("name", "name", FieldKind::Text),
        FieldDef::new("birthDate", "birth_date", FieldKind::Date),
    ],
};

pub static BOOK: EntitySchema = EntitySchema {
    entity: "book",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer),
        FieldDef::new("title", "title", FieldKind::Text),
        FieldDef::new("description", "description", FieldKind::Text),
        FieldDef::new("publicationDate", "publication_date", FieldKind::Date),
        FieldDef::new("price", "price", FieldKind::Integer),
        FieldDef::new("authorId", "author_id", FieldKind::Integer),
    ],
};
