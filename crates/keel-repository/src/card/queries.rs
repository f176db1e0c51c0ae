//! SQL templates for the `cards` table.
//!
//! Templates use `:name` placeholders resolved by [`Binder`].
//!
//! [`Binder`]: crate::db::Binder

// Metadata columns only; the payload is never selected together with them.
macro_rules! query_base {
    () => {
        "
SELECT
 card_id
,card_build
,card_stage
,card_step
,card_schema
"
    };
}

macro_rules! query_card_data {
    () => {
        "
SELECT
 card_id
,card_data
"
    };
}

macro_rules! stmt_insert {
    () => {
        "
INSERT INTO cards (
 card_build
,card_stage
,card_step
,card_schema
,card_data
) VALUES (
 :card_build
,:card_stage
,:card_step
,:card_schema
,:card_data
)
"
    };
}

pub const QUERY_BY_BUILD: &str = concat!(
    query_base!(),
    "FROM cards
WHERE card_build = :card_build
"
);

pub const QUERY_BY_STEP: &str = concat!(
    query_base!(),
    "FROM cards
WHERE card_step = :card_step
LIMIT 1
"
);

pub const QUERY_KEY: &str = concat!(
    query_card_data!(),
    "FROM cards
WHERE card_id = :card_id
LIMIT 1
"
);

pub const STMT_INSERT: &str = stmt_insert!();

pub const STMT_INSERT_RETURNING: &str = concat!(stmt_insert!(), "RETURNING card_id
");

pub const STMT_DELETE: &str = "
DELETE FROM cards
WHERE card_id = :card_id
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Binder, Dialect};

    fn squash(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_metadata_queries_skip_payload() {
        for query in [QUERY_BY_BUILD, QUERY_BY_STEP] {
            assert!(!query.contains("card_data"));
        }
        assert_eq!(
            squash(QUERY_BY_STEP),
            "SELECT card_id ,card_build ,card_stage ,card_step ,card_schema FROM cards WHERE card_step = :card_step LIMIT 1"
        );
    }

    #[test]
    fn test_payload_query_skips_metadata() {
        assert_eq!(
            squash(QUERY_KEY),
            "SELECT card_id ,card_data FROM cards WHERE card_id = :card_id LIMIT 1"
        );
    }

    #[test]
    fn test_returning_insert_extends_plain_insert() {
        assert!(STMT_INSERT_RETURNING.starts_with(STMT_INSERT));
        assert!(squash(STMT_INSERT_RETURNING).ends_with(") RETURNING card_id"));
        assert!(!STMT_INSERT.contains("RETURNING"));
    }

    #[test]
    fn test_insert_binds_all_columns_in_order() {
        let (sql, names) = Binder::new(Dialect::Postgres).rewrite(STMT_INSERT_RETURNING);
        assert_eq!(names, vec!["card_build", "card_stage", "card_step", "card_schema", "card_data"]);
        assert!(squash(&sql).contains("VALUES ( $1 ,$2 ,$3 ,$4 ,$5 )"));
    }
}
