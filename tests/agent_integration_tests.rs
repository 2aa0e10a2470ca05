//! Agent Integration Tests
//!
//! Runs the full pipeline (seed → DuckDB → classify → describe) over the
//! built-in food list, and drives the terminal menu with scripted input.

use nutri_risk_agent::app::prepare;
use nutri_risk_agent::engine::RiskFlags;
use nutri_risk_agent::menu::Menu;
use nutri_risk_agent::seed::default_foods;
use nutri_risk_agent::{
    AppConfig, ClassificationResult, FoodDatabase, NutrientProfile, RiskAgent, RiskTier, RuleEngine,
};
use std::io::Cursor;
use tempfile::TempDir;

/// Expected rule number for every seed food.
const EXPECTED_RULES: &[(&str, u8)] = &[
    ("Bacon Frito", 1),
    ("Salgadinho Queijo", 1),
    ("Queijo Mussarela", 1),
    ("Mortadela", 1),
    ("Azeite de Oliva", 9),
    ("Pao Integral", 5),
    ("Iogurte Natural Integral", 7),
    ("Biscoito Maizena", 4),
    ("Amendoim Torrado", 6),
    ("Salmao Grelhado", 7),
    ("Banana Prata", 7),
    ("Feijao Cozido", 8),
    ("Peito de Frango", 7),
    ("Brocolis Cozido", 8),
    ("Arroz Branco Cozido", 7),
    ("Refrigerante Cola", 4),
    ("Leite Integral", 7),
    ("Batata Doce", 7),
    ("Chocolate ao Leite", 3),
    ("Cenoura Cozida", 7),
    ("Hamburguer Industrial", 1),
    ("Gelatina", 7),
    ("Pao Frances", 2),
    ("Mel", 4),
    ("Manga", 7),
    ("Pipoca (Oleo e Sal)", 5),
    ("Bolo Simples", 4),
    ("Atum em Oleo (Drenado)", 7),
    ("Ovo Cozido", 7),
    ("Lentilha Cozida", 8),
    ("Abacaxi", 7),
    ("Abacate", 8),
    ("Alface", 7),
    ("Aveia", 5),
    ("Beterraba Cozida", 7),
    ("Cebola Cozida", 7),
    ("Cerveja Lager", 7),
    ("Champignon", 7),
    ("Couve Flor", 7),
    ("Doce de Leite", 4),
    ("Goiaba", 8),
    ("Hamburguer Caseiro", 7),
    ("Kiwi", 8),
    ("Maionese Industrial", 1),
    ("Mandioca Cozida", 7),
    ("Milho Cozido", 7),
    ("Nescau", 4),
    ("Ostra Crua", 7),
    ("Pera", 8),
    ("Tofu", 7),
];

struct Fixture {
    _dir: TempDir,
    config: AppConfig,
    db: FoodDatabase,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("unused.duckdb"),
        seed_csv: dir.path().join("dados_alimentos.csv"),
        report_csv: dir.path().join("relatorio_nutricional.csv"),
        thresholds_path: None,
        clear_screen: false,
    };

    let db = FoodDatabase::open_in_memory().unwrap();
    let summary = prepare(&db, &config).unwrap();
    assert_eq!(summary.inserted, 50);

    Fixture {
        _dir: dir,
        config,
        db,
    }
}

fn run_menu(fx: &Fixture, script: &str) -> String {
    let mut menu = Menu::new(
        &fx.db,
        RuleEngine::default(),
        &fx.config,
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
    );
    menu.run().unwrap();
    String::from_utf8(menu.into_output()).unwrap()
}

#[test]
fn test_every_seed_food_matches_expected_rule() {
    let engine = RuleEngine::default();
    let foods = default_foods();
    assert_eq!(foods.len(), EXPECTED_RULES.len());

    for (food, (name, rule)) in foods.iter().zip(EXPECTED_RULES) {
        assert_eq!(&food.name, name);
        assert_eq!(engine.classify(&food.profile).rule_number, *rule, "{}", name);
    }
}

#[test]
fn test_every_classified_seed_food_has_a_stored_description() {
    let fx = fixture();
    let agent = RiskAgent::new(RuleEngine::default(), &fx.db, &fx.db);

    for (name, _) in EXPECTED_RULES {
        let result = agent.analyze(name).unwrap();
        assert_ne!(result.tier, RiskTier::Gray, "{}", name);
        assert!(!result.description.starts_with("[ERRO"), "{}: {}", name, result.description);
    }
}

#[test]
fn test_scenario_multiple_factors() {
    let fx = fixture();
    let agent = RiskAgent::new(RuleEngine::default(), &fx.db, &fx.db);

    let result = agent.analyze("Bacon Frito").unwrap();
    assert_eq!(result.tier, RiskTier::Red);
    assert_eq!(result.label, "Risco Crítico (Múltiplos Fatores)");
    assert_eq!(result.description, "ALTO RISCO: Alto Sódio e Alta Gordura Saturada");
    assert_eq!(result.profile, NutrientProfile::new(1500.0, 15.0, 0.0, 37.0, 0.0));
}

#[test]
fn test_scenario_compensated_carbohydrate() {
    let fx = fixture();
    let agent = RiskAgent::new(RuleEngine::default(), &fx.db, &fx.db);

    let result = agent.analyze("Pao Integral").unwrap();
    assert_eq!(result.tier, RiskTier::Yellow);
    assert_eq!(result.label, "Risco Moderado (Alto Carboidrato Compensado)");
    assert!(result.description.contains("parcialmente compensado"));
}

#[test]
fn test_scenario_empty_energy_description() {
    let fx = fixture();
    let agent = RiskAgent::new(RuleEngine::default(), &fx.db, &fx.db);

    let result = agent.analyze("Refrigerante Cola").unwrap();
    assert_eq!(result.tier, RiskTier::Yellow);
    assert_eq!(result.label, "Risco Moderado (Carboidratos Sem Benefício)");
    assert!(result.description.contains("muita energia"));
}

#[test]
fn test_scenario_unknown_food() {
    let fx = fixture();
    let agent = RiskAgent::new(RuleEngine::default(), &fx.db, &fx.db);

    let result = agent.analyze("Pizza de Marte").unwrap();
    assert_eq!(result.tier, RiskTier::Gray);
    assert_eq!(result.label, "Não Encontrado");
    assert_eq!(result.profile, NutrientProfile::default());
    assert_eq!(result, ClassificationResult::not_found());
}

#[test]
fn test_exactly_one_rule_wins_for_every_flag_combination() {
    use nutri_risk_agent::engine::{first_match, RULES};

    for flags in RiskFlags::all_combinations() {
        let winner = first_match(&flags);
        let earlier_matches = RULES
            .iter()
            .take_while(|r| r.number < winner.number)
            .filter(|r| r.matches(&flags))
            .count();
        assert_eq!(earlier_matches, 0, "{:?}", flags);
    }
}

#[test]
fn test_menu_analyze_then_exit() {
    let fx = fixture();
    let output = run_menu(&fx, "1\nbacon frito\n\n5\n");

    assert!(output.contains("AGENTE DE ALERTA NUTRICIONAL"));
    assert!(output.contains("BACON FRITO"));
    assert!(output.contains(">>> VERMELHO - Risco Crítico (Múltiplos Fatores) <<<"));
    assert!(output.contains("Regra Ativada: ALTO RISCO: Alto Sódio e Alta Gordura Saturada"));
    assert!(output.contains("  > Sódio: 1500.00 mg"));
    assert!(output.contains("Encerrando o Agente Nutricional"));
}

#[test]
fn test_menu_falls_back_to_raw_name() {
    let fx = fixture();
    // Title-casing would give "Pipoca (Oleo E Sal)", which is not stored
    let output = run_menu(&fx, "1\nPipoca (Oleo e Sal)\n\n5\n");

    assert!(output.contains("Risco Moderado (Alto Carboidrato Compensado)"));
}

#[test]
fn test_menu_unknown_food_is_gray() {
    let fx = fixture();
    let output = run_menu(&fx, "1\nPizza de Marte\n\n5\n");

    assert!(output.contains(">>> CINZA - Não Encontrado <<<"));
    assert!(output.contains("  > Fibra: 0.00 g"));
}

#[test]
fn test_menu_lists_foods_sorted() {
    let fx = fixture();
    let output = run_menu(&fx, "2\n\n5\n");

    let abacate = output.find("Abacate").unwrap();
    let tofu = output.find("Tofu").unwrap();
    assert!(abacate < tofu);
}

#[test]
fn test_menu_exports_report() {
    let fx = fixture();
    let output = run_menu(&fx, "3\n\n5\n");

    assert!(output.contains("Relatório exportado"));
    let contents = std::fs::read_to_string(&fx.config.report_csv).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("Nome_Alimento,Sodio,Gordura_Saturada,Fibra,Proteina,Carboidrato")
    );
    assert_eq!(lines.count(), 50);
}

#[test]
fn test_menu_shows_statistics() {
    let fx = fixture();
    let output = run_menu(&fx, "4\n\n5\n");

    assert!(output.contains("Cálculos baseados em 50 alimentos do BD."));
    assert!(output.contains("SODIO"));
    assert!(output.contains("CARBOIDRATO"));
}

#[test]
fn test_menu_invalid_option_and_eof() {
    let fx = fixture();
    // No exit command: input simply ends
    let output = run_menu(&fx, "9\n\n");

    assert!(output.contains("Opção inválida"));
    assert!(!output.contains("Encerrando"));
}

#[test]
fn test_menu_empty_name_returns_to_menu() {
    let fx = fixture();
    let output = run_menu(&fx, "1\n\n5\n");

    assert!(!output.contains("Alimento Analisado"));
    assert!(output.contains("Encerrando"));
}
