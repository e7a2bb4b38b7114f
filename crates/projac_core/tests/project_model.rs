use chrono::NaiveDate;
use projac_core::{FundingAgency, Project, ProjectStatus, Researcher, Role, ValidationError};
use rust_decimal::Decimal;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[test]
fn new_project_starts_in_progress() {
    let project = Project::new(
        "Projeto 1",
        "Objetivo do projeto",
        date(2024, 3, 1),
        dec("1000.00"),
    );

    assert!(!project.uuid.is_nil());
    assert_eq!(project.concluded_on, None);
    assert!(!project.canceled);
    assert_eq!(project.status(), ProjectStatus::EmAndamento);
}

#[test]
fn status_follows_cancel_conclude_priority() {
    let mut project = Project::new(
        "Projeto 1",
        "Objetivo do projeto",
        date(2024, 3, 1),
        dec("1000.00"),
    );

    project.cancel();
    assert_eq!(project.status(), ProjectStatus::Cancelado);

    // Cancellation wins even with a conclusion date set.
    project.conclude(date(2024, 12, 20));
    assert_eq!(project.status(), ProjectStatus::Cancelado);

    project.canceled = false;
    assert_eq!(project.status(), ProjectStatus::Concluido);

    project.concluded_on = None;
    assert_eq!(project.status(), ProjectStatus::EmAndamento);
}

#[test]
fn status_tags_match_wire_representation() {
    assert_eq!(ProjectStatus::Cancelado.as_str(), "CANCELADO");
    assert_eq!(ProjectStatus::Concluido.as_str(), "CONCLUIDO");
    assert_eq!(ProjectStatus::EmAndamento.as_str(), "EM_ANDAMENTO");

    let json = serde_json::to_value(ProjectStatus::EmAndamento).unwrap();
    assert_eq!(json, "EM_ANDAMENTO");
    let json = serde_json::to_value(Role::Coordenador).unwrap();
    assert_eq!(json, "COORDENADOR");
}

#[test]
fn researcher_full_name_concatenates_with_single_space() {
    let researcher = Researcher::new(
        "João",
        "Silva",
        "joao.silva@example.com",
        date(1985, 7, 14),
        "http://example.com/lattes",
    );

    assert_eq!(researcher.full_name(), "João Silva");
}

#[test]
fn agency_full_name_wraps_acronym_in_parentheses() {
    let agency = FundingAgency::new("CNPq", "CNPq");
    assert_eq!(agency.full_name(), "CNPq (CNPq)");

    let fapesp = FundingAgency::new(
        "Fundação de Amparo à Pesquisa do Estado de São Paulo",
        "FAPESP",
    );
    assert_eq!(
        fapesp.full_name(),
        "Fundação de Amparo à Pesquisa do Estado de São Paulo (FAPESP)"
    );
}

#[test]
fn project_validate_rejects_empty_title_and_negative_amount() {
    let mut project = Project::new("  ", "objective", date(2024, 3, 1), dec("100.00"));
    assert_eq!(
        project.validate().unwrap_err(),
        ValidationError::EmptyField {
            entity: "project",
            field: "title",
        }
    );

    project.title = "Projeto 1".to_string();
    project.requested_amount = dec("-1.00");
    assert_eq!(
        project.validate().unwrap_err(),
        ValidationError::NegativeAmount(dec("-1.00"))
    );
}

#[test]
fn researcher_validate_rejects_bad_email_and_url() {
    let mut researcher = Researcher::new(
        "João",
        "Silva",
        "not-an-email",
        date(1985, 7, 14),
        "http://example.com/lattes",
    );
    assert_eq!(
        researcher.validate().unwrap_err(),
        ValidationError::InvalidEmail("not-an-email".to_string())
    );

    researcher.email = "joao.silva@example.com".to_string();
    researcher.lattes_url = "ftp://example.com".to_string();
    assert_eq!(
        researcher.validate().unwrap_err(),
        ValidationError::InvalidLattesUrl("ftp://example.com".to_string())
    );

    researcher.lattes_url = "http://example.com/lattes".to_string();
    assert!(researcher.validate().is_ok());
}

#[test]
fn project_serialization_uses_expected_wire_fields() {
    let mut project = Project::new(
        "Projeto 1",
        "Objetivo do projeto",
        date(2024, 3, 1),
        dec("1000.00"),
    );
    project.conclude(date(2024, 12, 20));

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["uuid"], project.uuid.to_string());
    assert_eq!(json["title"], "Projeto 1");
    assert_eq!(json["created_on"], "2024-03-01");
    assert_eq!(json["requested_amount"], "1000.00");
    assert_eq!(json["concluded_on"], "2024-12-20");
    assert_eq!(json["canceled"], false);

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}
