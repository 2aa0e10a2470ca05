//! DuckDB-backed food and rule storage
//!
//! Tables:
//! - `alimentos`: one row per food, nutrient values per 100g
//! - `regras`: rule descriptions keyed by tier code

use duckdb::{params, Connection};
use std::path::Path;

use super::{NutrientStore, RuleStore, StoreError};
use crate::types::{FoodRecord, NutrientColumn, NutrientProfile, RiskTier};

const SCHEMA_SQL: &str = "
    CREATE SEQUENCE IF NOT EXISTS alimentos_id_seq START 1;
    CREATE TABLE IF NOT EXISTS alimentos (
        id INTEGER PRIMARY KEY DEFAULT nextval('alimentos_id_seq'),
        nome_alimento VARCHAR NOT NULL UNIQUE,
        sodio DOUBLE NOT NULL,
        gordura_saturada DOUBLE NOT NULL,
        fibra DOUBLE NOT NULL,
        proteina DOUBLE NOT NULL,
        carboidrato DOUBLE NOT NULL
    );
    CREATE SEQUENCE IF NOT EXISTS regras_id_seq START 1;
    CREATE TABLE IF NOT EXISTS regras (
        id INTEGER PRIMARY KEY DEFAULT nextval('regras_id_seq'),
        nivel_risco VARCHAR NOT NULL,
        descricao_regra VARCHAR NOT NULL
    );
";

/// Rule descriptions seeded into an empty `regras` table, in insertion order.
pub const CANONICAL_RULES: [(RiskTier, &str); 8] = [
    (RiskTier::Red, "ALTO RISCO: Alto Sódio e Alta Gordura Saturada"),
    (RiskTier::Red, "ALTO RISCO: Alto Sódio e Alto Carboidrato com Baixa Fibra"),
    (RiskTier::Red, "ALTO RISCO: Alta Gordura Saturada e Alto Carboidrato com Baixa Fibra"),
    (
        RiskTier::Yellow,
        "MODERADO: Alto em Carboidratos, mas quase sem Fibras (oferece muita energia, mas poucos benefícios à saúde)",
    ),
    (
        RiskTier::Yellow,
        "MODERADO: Apresenta um fator de risco isolado (Alto Sódio OU Alta Gordura), mas o restante da composição é equilibrada",
    ),
    (
        RiskTier::Yellow,
        "MODERADO: Alto Carboidrato, mas parcialmente compensado por Proteína ou Fibra",
    ),
    (
        RiskTier::Green,
        "BAIXO RISCO: Todos os fatores críticos (Sódio/Gordura/Carboidrato) abaixo dos limites",
    ),
    (
        RiskTier::Green,
        "BAIXO RISCO: Níveis de risco controlados E Fibra OU Proteína alta (Perfil Ideal)",
    ),
];

/// Food and rule storage over a single DuckDB connection.
pub struct FoodDatabase {
    conn: Connection,
}

impl FoodDatabase {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        tracing::info!(path = %path.display(), "opening food database");
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create tables if they do not exist.
    pub fn create_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        tracing::info!("schema ready");
        Ok(())
    }

    /// Insert the canonical rules when `regras` is empty. Returns rows inserted.
    pub fn seed_rules(&self) -> Result<usize, StoreError> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM regras", [], |row| row.get(0))?;
        if existing > 0 {
            tracing::debug!(existing, "rules already present");
            return Ok(0);
        }

        let mut stmt = self
            .conn
            .prepare("INSERT INTO regras (nivel_risco, descricao_regra) VALUES (?, ?)")?;
        for (tier, text) in CANONICAL_RULES {
            stmt.execute(params![tier.code(), text])?;
        }

        tracing::info!(count = CANONICAL_RULES.len(), "rules inserted");
        Ok(CANONICAL_RULES.len())
    }

    /// Insert one food. A name already present is left untouched and
    /// `false` is returned.
    pub fn insert_food(&self, food: &FoodRecord) -> Result<bool, StoreError> {
        let p = &food.profile;
        let changed = self.conn.execute(
            "INSERT INTO alimentos (nome_alimento, sodio, gordura_saturada, fibra, proteina, carboidrato)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT DO NOTHING",
            params![food.name, p.sodium, p.saturated_fat, p.fiber, p.protein, p.carbohydrate],
        )?;
        Ok(changed > 0)
    }

    pub fn food_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM alimentos", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    /// Close the connection, reporting any failure.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        tracing::info!("database closed");
        Ok(())
    }
}

fn profile_from_row(row: &duckdb::Row<'_>, offset: usize) -> duckdb::Result<NutrientProfile> {
    Ok(NutrientProfile {
        sodium: row.get(offset)?,
        saturated_fat: row.get(offset + 1)?,
        fiber: row.get(offset + 2)?,
        protein: row.get(offset + 3)?,
        carbohydrate: row.get(offset + 4)?,
    })
}

impl NutrientStore for FoodDatabase {
    fn lookup(&self, food_name: &str) -> Result<Option<NutrientProfile>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT sodio, gordura_saturada, fibra, proteina, carboidrato
             FROM alimentos WHERE nome_alimento = ?",
        )?;
        let mut rows = stmt.query_map(params![food_name], |row| profile_from_row(row, 0))?;
        let profile = rows.next().transpose()?;
        Ok(profile)
    }

    fn all_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT nome_alimento FROM alimentos ORDER BY nome_alimento")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn column_values(&self, column: NutrientColumn) -> Result<Vec<f64>, StoreError> {
        // Column names come from a closed enum, never from user input
        let sql = format!("SELECT {} FROM alimentos ORDER BY id", column.column_name());
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(values)
    }

    fn all_rows(&self) -> Result<Vec<FoodRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT nome_alimento, sodio, gordura_saturada, fibra, proteina, carboidrato
             FROM alimentos ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FoodRecord {
                    name: row.get(0)?,
                    profile: profile_from_row(row, 1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl RuleStore for FoodDatabase {
    fn find_description(
        &self,
        tier: RiskTier,
        fragment: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT descricao_regra FROM regras
             WHERE nivel_risco = ? AND contains(lower(descricao_regra), ?)
             ORDER BY id
             LIMIT 1",
        )?;
        let mut rows =
            stmt.query_map(params![tier.code(), fragment], |row| row.get::<_, String>(0))?;
        let description = rows.next().transpose()?;
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FoodDatabase {
        let db = FoodDatabase::open_in_memory().unwrap();
        db.create_schema().unwrap();
        db.seed_rules().unwrap();
        db
    }

    fn food(name: &str, values: [f64; 5]) -> FoodRecord {
        let [sodium, fat, fiber, protein, carb] = values;
        FoodRecord::new(name, NutrientProfile::new(sodium, fat, fiber, protein, carb))
    }

    #[test]
    fn test_schema_and_rules_are_idempotent() {
        let db = seeded();
        db.create_schema().unwrap();
        assert_eq!(db.seed_rules().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_lookup() {
        let db = seeded();
        assert!(db.insert_food(&food("Bacon Frito", [1500.0, 15.0, 0.0, 37.0, 0.0])).unwrap());

        let profile = db.lookup("Bacon Frito").unwrap().unwrap();
        assert_eq!(profile, NutrientProfile::new(1500.0, 15.0, 0.0, 37.0, 0.0));

        // Names are case-sensitive
        assert!(db.lookup("bacon frito").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_names_are_ignored() {
        let db = seeded();
        assert!(db.insert_food(&food("Mel", [4.0, 0.0, 0.0, 0.1, 82.0])).unwrap());
        assert!(!db.insert_food(&food("Mel", [9.0, 9.0, 9.0, 9.0, 9.0])).unwrap());

        assert_eq!(db.food_count().unwrap(), 1);
        assert_eq!(db.lookup("Mel").unwrap().unwrap().sodium, 4.0);
    }

    #[test]
    fn test_names_sorted_and_rows_in_insertion_order() {
        let db = seeded();
        db.insert_food(&food("Tofu", [7.0, 0.8, 0.5, 10.0, 1.9])).unwrap();
        db.insert_food(&food("Abacaxi", [1.0, 0.0, 1.4, 0.5, 13.0])).unwrap();

        assert_eq!(db.all_names().unwrap(), vec!["Abacaxi", "Tofu"]);

        let rows = db.all_rows().unwrap();
        assert_eq!(rows[0].name, "Tofu");
        assert_eq!(rows[1].name, "Abacaxi");

        assert_eq!(db.column_values(NutrientColumn::Sodium).unwrap(), vec![7.0, 1.0]);
        assert_eq!(db.column_values(NutrientColumn::Fiber).unwrap(), vec![0.5, 1.4]);
    }

    #[test]
    fn test_find_description_by_fragment_and_tier() {
        let db = seeded();

        let text = db.find_description(RiskTier::Yellow, "parcialmente compensado").unwrap();
        assert_eq!(
            text.as_deref(),
            Some("MODERADO: Alto Carboidrato, mas parcialmente compensado por Proteína ou Fibra")
        );

        // Accented fragments match lowercased text
        let text = db.find_description(RiskTier::Green, "fibra ou proteína alta").unwrap();
        assert!(text.unwrap().contains("Perfil Ideal"));

        // Right text, wrong tier
        assert!(db.find_description(RiskTier::Red, "parcialmente compensado").unwrap().is_none());
    }

    #[test]
    fn test_seeded_rules_per_tier() {
        let reds = CANONICAL_RULES.iter().filter(|(t, _)| *t == RiskTier::Red).count();
        let yellows = CANONICAL_RULES.iter().filter(|(t, _)| *t == RiskTier::Yellow).count();
        let greens = CANONICAL_RULES.iter().filter(|(t, _)| *t == RiskTier::Green).count();
        assert_eq!((reds, yellows, greens), (3, 3, 2));
    }
}
