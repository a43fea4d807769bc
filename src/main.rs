use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use uuid::Uuid;
use hitos_domain::{DomainStubs, PhaseMatrix, TaskStatus, TaskType};
use hitos_store::InMemoryAgencyStore;
use hitos_workflow::{ActivatePhaseRequest, AgencyService, SeedCenterRequest, WorkflowConfig};

/// Pequeño menú interactivo para administrar centros y sus hitos usando el
/// almacén en memoria y el directorio de staff de ejemplo.
///
/// Opciones soportadas:
/// 1) Registrar centro (siembra sus hitos en STANDBY)
/// 2) Ver centros
/// 3) Renombrar centro
/// 4) Ver tareas de un centro
/// 5) Activar fase
/// 6) Activar un tipo de tarea
/// 7) Cambiar estado de una tarea
/// 8) Cambiar estado de un caso
/// 9) Salir
fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let config = WorkflowConfig::from_env()?;
    log::info!("configuracion: condicional={} politica={} casos_sembrados={}",
               config.conditional_activation, config.exhausted_policy, config.seed_cases);
    let store = Arc::new(InMemoryAgencyStore::with_staff(DomainStubs::sample_roster()));
    let service = AgencyService::new(store, config);

    loop {
        println!("\n== Hitos CLI menu ==");
        println!("1) Registrar centro");
        println!("2) Ver centros");
        println!("3) Renombrar centro");
        println!("4) Ver tareas de un centro");
        println!("5) Activar fase");
        println!("6) Activar tipo de tarea");
        println!("7) Cambiar estado de tarea");
        println!("8) Cambiar estado de caso");
        println!("9) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                let name = prompt("Nombre del centro: ")?;
                let center_type = prompt("Tipo de centro (enter para vacío): ")?;
                let parent = prompt("Usuario padre (enter para ninguno): ")?;
                let aunt_uncle = prompt("Usuario tío/tía (enter para ninguno): ")?;
                let req = SeedCenterRequest { name,
                                              center_type,
                                              advisor: None,
                                              parent_staff: Some(parent),
                                              aunt_uncle_staff: Some(aunt_uncle) };
                match service.register_center(req) {
                    Ok(c) => println!("Centro registrado: {} ({})", c.name, c.id),
                    Err(e) => eprintln!("Error registrando centro: {}", e),
                }
            }
            "2" => {
                match service.list_centers() {
                    Ok(centers) => {
                        println!("\nNOMBRE                         | TIPO            | PADRE      | VISIBLE");
                        println!("------------------------------------------------------------------------");
                        for c in centers {
                            let parent = c.parent_staff.clone().unwrap_or_else(|| "-".into());
                            println!("{:<30} | {:<15} | {:<10} | {}", c.name, c.center_type, parent, c.visible);
                        }
                    }
                    Err(e) => eprintln!("Error listando centros: {}", e),
                }
            }
            "3" => {
                let name = prompt("Centro actual: ")?;
                let new_name = prompt("Nombre nuevo: ")?;
                match service.rename_center(name.trim(), &new_name) {
                    Ok(c) => println!("Centro renombrado: {}", c.name),
                    Err(e) => eprintln!("Error renombrando centro: {}", e),
                }
            }
            "4" => {
                let name = prompt("Centro: ")?;
                match service.tasks_for_center(name.trim()) {
                    Ok(tasks) => {
                        println!("\nID                                   | FASE | TIPO         | ESTADO           | RESPONSABLE | DESCRIPCION");
                        println!("---------------------------------------------------------------------------------------------------------------");
                        for t in tasks {
                            let who = t.responsible.clone().unwrap_or_else(|| "-".into());
                            println!("{} | {:>4} | {:<12} | {:<16} | {:<11} | {}",
                                     t.id, t.phase_id, t.task_type, t.status, who, t.description);
                        }
                    }
                    Err(e) => eprintln!("Error listando tareas: {}", e),
                }
            }
            "5" => {
                let req = match activation_request()? {
                    Some(r) => r,
                    None => continue,
                };
                match service.activate_phase(&req) {
                    Ok(outcome) => println!("Resultado: {}", serde_json::to_string(&outcome)?),
                    Err(e) => eprintln!("Error activando fase: {}", e),
                }
            }
            "6" => {
                let req = match activation_request()? {
                    Some(r) => r,
                    None => continue,
                };
                let tt_s = prompt("Tipo de tarea (MURAL, SCRIPT, CERTIFICATES...): ")?;
                let task_type: TaskType = match tt_s.parse() {
                    Ok(t) => t,
                    Err(e) => { eprintln!("{}", e); continue; }
                };
                match service.activate_task_type(&req, task_type) {
                    Ok(outcome) => println!("Resultado: {}", serde_json::to_string(&outcome)?),
                    Err(e) => eprintln!("Error activando {}: {}", task_type, e),
                }
            }
            "7" => {
                let id_s = prompt("Tarea (UUID): ")?;
                let id = match Uuid::parse_str(id_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                let status_s = prompt("Nuevo estado (Iniciado, Concluido...): ")?;
                let status: TaskStatus = match status_s.parse() {
                    Ok(s) => s,
                    Err(e) => { eprintln!("{}", e); continue; }
                };
                let author = prompt("Autor: ")?;
                let note = prompt("Nota: ")?;
                match service.update_task_status(&id, status, author.trim(), note.trim()) {
                    Ok(t) => println!("Tarea {} -> {}", t.id, t.status),
                    Err(e) => eprintln!("Error cambiando estado: {}", e),
                }
            }
            "8" => {
                let id_s = prompt("Tarea del caso (UUID): ")?;
                let task_id = match Uuid::parse_str(id_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                let case = match service.case_for_task(&task_id) {
                    Ok(Some(c)) => c,
                    Ok(None) => { eprintln!("La tarea no tiene caso"); continue; }
                    Err(e) => { eprintln!("Error buscando caso: {}", e); continue; }
                };
                let status_s = prompt("Estado (1=Pendiente 2=En curso 3=Completado 4=Detenido): ")?;
                let status_id: i32 = match status_s.trim().parse() {
                    Ok(n) => n,
                    Err(_) => { eprintln!("Estado inválido"); continue; }
                };
                match service.update_case_status(&case.id, status_id) {
                    Ok(c) => println!("Caso {} -> {} (tiempo: {:?})", c.id, c.status, c.elapsed()),
                    Err(e) => eprintln!("Error cambiando caso: {}", e),
                }
            }
            "9" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

fn activation_request() -> io::Result<Option<ActivatePhaseRequest>> {
    let center_name = prompt("Centro: ")?;
    let keys: Vec<&str> = PhaseMatrix::definitions().map(|d| d.key).collect();
    let phase_key = prompt(&format!("Clave de fase ({}): ", keys.join(", ")))?;
    let user_s = prompt("Id de usuario que activa: ")?;
    let user_id: i64 = match user_s.trim().parse() {
        Ok(n) => n,
        Err(_) => { eprintln!("Id inválido"); return Ok(None); }
    };
    Ok(Some(ActivatePhaseRequest { center_name: center_name.trim().to_string(), phase_key, user_id }))
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}
