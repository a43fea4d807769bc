use crate::{DepartmentField, StaffMember, StaffRole};

pub struct DomainStubs;

impl DomainStubs {
    /// Roster de ejemplo que mezcla ambas representaciones de departamentos
    /// (lista y texto separado por comas), como ocurre en los datos reales.
    pub fn sample_roster() -> Vec<StaffMember> {
        vec![StaffMember::new(1, "ana", "Ana Gómez", StaffRole::Administrator, DepartmentField::List(vec![])),
             StaffMember::new(2,
                              "luis",
                              "Luis Pérez",
                              StaffRole::Collaborator,
                              DepartmentField::Text("Logistics, Collector".into())),
             StaffMember::new(3,
                              "marta",
                              "Marta Ruiz",
                              StaffRole::Collaborator,
                              DepartmentField::List(vec!["Marketing".into()])),
             StaffMember::new(4,
                              "sofia",
                              "Sofía Díaz",
                              StaffRole::Collaborator,
                              DepartmentField::List(vec!["Art".into(), "Video".into()])),
             StaffMember::new(5, "pablo", "Pablo León", StaffRole::Advisor, DepartmentField::Text("Production, Logística".into()))]
    }
}
