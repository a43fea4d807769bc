use hitos_domain::{CaseStatus, DomainStubs, TaskStatus, TaskType};
use hitos_store::InMemoryAgencyStore;
use hitos_workflow::{ActivatePhaseRequest, AgencyService, SeedCenterRequest, WorkflowConfig, WorkflowError};
use std::sync::Arc;

fn service() -> AgencyService<InMemoryAgencyStore> {
  let store = Arc::new(InMemoryAgencyStore::with_staff(DomainStubs::sample_roster()));
  let service = AgencyService::new(store, WorkflowConfig::default());
  service.register_center(SeedCenterRequest { name: "Lincoln School".into(),
                                              center_type: "High school".into(),
                                              advisor: Some("pablo".into()),
                                              parent_staff: Some("ana".into()),
                                              aunt_uncle_staff: None })
         .unwrap();
  service
}

fn activate(service: &AgencyService<InMemoryAgencyStore>, key: &str) {
  let req = ActivatePhaseRequest { center_name: "Lincoln School".into(), phase_key: key.into(), user_id: 1 };
  service.activate_phase(&req).unwrap();
}

#[test]
fn duplicate_center_name_is_a_conflict() {
  let s = service();
  let dup = SeedCenterRequest { name: "  lincoln SCHOOL ".into(), ..Default::default() };
  assert!(matches!(s.register_center(dup), Err(WorkflowError::Conflict(_))));
  assert_eq!(s.tasks_for_center("Lincoln School").unwrap().len(), 23);
  let empty = SeedCenterRequest { name: "   ".into(), ..Default::default() };
  assert!(matches!(s.register_center(empty), Err(WorkflowError::Validation(_))));
}

#[test]
fn visibility_and_roles_are_editable() {
  let s = service();
  assert!(!s.set_center_visibility("Lincoln School", false).unwrap().visible);
  assert!(!s.center("Lincoln School").unwrap().visible);

  let c = s.update_center_roles("Lincoln School", Some("luis".into()), Some(" ".into())).unwrap();
  assert_eq!(c.parent_staff.as_deref(), Some("luis"));
  assert!(c.aunt_uncle_staff.is_none());
  assert_eq!(c.advisor.as_deref(), Some("pablo"));
  assert!(matches!(s.set_center_visibility("Nowhere", true), Err(WorkflowError::NotFound(_))));
}

#[test]
fn case_status_ids_drive_the_timestamps() {
  let s = service();
  activate(&s, "COMBOS");
  let task = s.tasks_for_center("Lincoln School")
              .unwrap()
              .into_iter()
              .find(|t| t.phase_id == 1 && t.task_type == TaskType::Collection)
              .unwrap();
  let case = s.case_for_task(&task.id).unwrap().expect("case");
  assert_eq!(case.status, CaseStatus::Pending);

  let started = s.update_case_status(&case.id, 2).unwrap();
  let first_start = started.started_at.expect("start");
  s.update_case_status(&case.id, 1).unwrap();
  let again = s.update_case_status(&case.id, 2).unwrap();
  assert_eq!(again.started_at, Some(first_start));
  assert!(again.ended_at.is_none());

  let done = s.update_case_status(&case.id, 3).unwrap();
  assert_eq!(done.status, CaseStatus::Completed);
  assert!(done.ended_at.is_some());
  assert!(matches!(s.update_case_status(&case.id, 9), Err(WorkflowError::Validation(_))));
}

#[test]
fn case_can_be_handed_to_another_member() {
  let s = service();
  activate(&s, "COMBOS");
  let survey = s.tasks_for_center("Lincoln School")
                .unwrap()
                .into_iter()
                .find(|t| t.phase_id == 1 && t.task_type == TaskType::Survey)
                .unwrap();
  let case = s.case_for_task(&survey.id).unwrap().unwrap();
  assert_eq!(s.reassign_case(&case.id, "sofia").unwrap().responsible.as_deref(), Some("sofia"));
  assert!(matches!(s.reassign_case(&case.id, "nadie"), Err(WorkflowError::NotFound(_))));
}

#[test]
fn task_status_moves_only_after_activation() {
  let s = service();
  let tasks = s.tasks_for_center("Lincoln School").unwrap();
  let collection = tasks.iter().find(|t| t.phase_id == 3 && t.task_type == TaskType::Collection).unwrap();
  assert!(matches!(s.update_task_status(&collection.id, TaskStatus::Iniciado, "luis", "inicio"),
                   Err(WorkflowError::Validation(_))));

  activate(&s, "EXTERIOR");
  let t = s.update_task_status(&collection.id, TaskStatus::Concluido, "luis", "entregado").unwrap();
  assert_eq!(t.status, TaskStatus::Concluido);
  assert!(t.concluded_at.is_some());
  assert_eq!(t.history().iter().map(|h| h.action.as_str()).collect::<Vec<_>>(),
             vec!["SEED", "ACTIVATION", "STATUS"]);
}

#[test]
fn renamed_center_keeps_its_milestones() {
  let s = service();
  let c = s.rename_center("Lincoln School", " Lincoln Academy ").unwrap();
  assert_eq!(c.name, "Lincoln Academy");
  assert!(s.tasks_for_center("Lincoln School").unwrap().is_empty());
  assert_eq!(s.tasks_for_center("Lincoln Academy").unwrap().len(), 23);

  let req = ActivatePhaseRequest { center_name: "Lincoln Academy".into(), phase_key: "COMBOS".into(), user_id: 1 };
  assert_eq!(s.activate_phase(&req).unwrap().activated_count(), 2);
  let old = ActivatePhaseRequest { center_name: "Lincoln School".into(), ..req };
  assert!(matches!(s.activate_phase(&old), Err(WorkflowError::NotFound(_))));
}

#[test]
fn rename_rejects_taken_or_blank_names() {
  let s = service();
  s.register_center(SeedCenterRequest { name: "Second School".into(), ..Default::default() }).unwrap();
  assert!(matches!(s.rename_center("Second School", "LINCOLN SCHOOL"), Err(WorkflowError::Conflict(_))));
  assert!(matches!(s.rename_center("Second School", "   "), Err(WorkflowError::Validation(_))));
  assert!(matches!(s.rename_center("Nowhere", "Elsewhere"), Err(WorkflowError::NotFound(_))));

  let names: Vec<String> = s.list_centers().unwrap().into_iter().map(|c| c.name).collect();
  assert_eq!(names, vec!["Lincoln School", "Second School"]);
  assert_eq!(s.tasks_for_center("Second School").unwrap().len(), 23);
}
