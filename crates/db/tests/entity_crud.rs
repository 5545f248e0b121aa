//! Repository round-trips for clients, projects, tasks and subtasks.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use gestion_core::status::{ProjectStatus, TaskStatus};
use gestion_core::types::DbId;
use gestion_db::models::client::{ClientFilters, CreateClient, UpdateClient};
use gestion_db::models::project::{CreateProject, ProjectFilters, UpdateProject};
use gestion_db::models::subtask::{CreateSubtask, SubtaskFilters, UpdateSubtask};
use gestion_db::models::task::{CreateTask, TaskFilters, UpdateTask};
use gestion_db::repositories::{
    ClientRepo, DetailLoader, ProjectRepo, SubtaskRepo, TaskRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_client(nombre: &str, empresa: &str) -> CreateClient {
    CreateClient {
        nombre: nombre.to_string(),
        email: format!("{}@example.com", nombre.to_lowercase()),
        empresa: empresa.to_string(),
        activo: None,
    }
}

fn new_project(cliente_id: DbId, nombre: &str) -> CreateProject {
    CreateProject {
        nombre: nombre.to_string(),
        descripcion: "Rediseño del portal".to_string(),
        estado: None,
        cliente_id,
        fecha_inicio: date(2026, 1, 10),
        fecha_entrega: date(2026, 3, 31),
    }
}

fn new_task(proyecto_id: DbId, titulo: &str, progreso: i32) -> CreateTask {
    CreateTask {
        titulo: titulo.to_string(),
        descripcion: "Implementar".to_string(),
        estado: None,
        progreso: Some(progreso),
        proyecto_id,
    }
}

fn new_subtask(tarea_id: DbId, titulo: &str) -> CreateSubtask {
    CreateSubtask {
        titulo: titulo.to_string(),
        completada: None,
        tarea_id,
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_defaults_and_update(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    assert!(client.activo);

    let patch = UpdateClient {
        empresa: Some("Acme Global".to_string()),
        ..Default::default()
    };
    let updated = ClientRepo::update(&pool, client.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.empresa, "Acme Global");
    assert_eq!(updated.nombre, "Acme");
    assert_eq!(updated.fecha_creacion, client.fecha_creacion);

    assert!(ClientRepo::update(&pool, 9999, &patch).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_filters_and_ordering(pool: PgPool) {
    let first = ClientRepo::create(&pool, &new_client("Uno", "Norte"))
        .await
        .unwrap();
    let second = ClientRepo::create(&pool, &new_client("Dos", "Sur"))
        .await
        .unwrap();
    let third = ClientRepo::create(&pool, &new_client("Tres", "Norte"))
        .await
        .unwrap();
    ClientRepo::deactivate(&pool, second.id).await.unwrap();

    let all = ClientRepo::list(&pool, &ClientFilters::default()).await.unwrap();
    let ids: Vec<DbId> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id], "newest first");

    let norte = ClientRepo::list(
        &pool,
        &ClientFilters {
            empresa: Some("Norte".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(norte.len(), 2);

    let inactive_norte = ClientRepo::list(
        &pool,
        &ClientFilters {
            activo: Some(false),
            empresa: Some("Norte".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(inactive_norte.is_empty(), "filters combine with AND");

    let inactive = ClientRepo::list(
        &pool,
        &ClientFilters {
            activo: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].id, second.id);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_defaults(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Portal"))
        .await
        .unwrap();

    assert_eq!(project.estado, ProjectStatus::Pending);
    assert_eq!(project.progreso, 0);
    assert_eq!(project.cliente_id, client.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_update_never_touches_progress(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Portal"))
        .await
        .unwrap();
    assert!(ProjectRepo::set_progress(&pool, project.id, 40).await.unwrap());

    let patch = UpdateProject {
        estado: Some(ProjectStatus::InTesting),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.estado, ProjectStatus::InTesting);
    assert_eq!(updated.progreso, 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_filters(pool: PgPool) {
    let a = ClientRepo::create(&pool, &new_client("A", "A"))
        .await
        .unwrap();
    let b = ClientRepo::create(&pool, &new_client("B", "B"))
        .await
        .unwrap();
    let pa = ProjectRepo::create(&pool, &new_project(a.id, "PA"))
        .await
        .unwrap();
    let mut finished = new_project(b.id, "PB");
    finished.estado = Some(ProjectStatus::Finished);
    let pb = ProjectRepo::create(&pool, &finished).await.unwrap();

    let by_client = ProjectRepo::list(
        &pool,
        &ProjectFilters {
            cliente_id: Some(a.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_client.len(), 1);
    assert_eq!(by_client[0].id, pa.id);

    let by_status = ProjectRepo::list(
        &pool,
        &ProjectFilters {
            estado: Some(ProjectStatus::Finished),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, pb.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_date_check_is_enforced_by_storage(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let mut input = new_project(client.id, "Backwards");
    input.fecha_entrega = date(2025, 12, 31);

    let err = ProjectRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("ck_proyectos_fechas"));
}

// ---------------------------------------------------------------------------
// Tasks and subtasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_crud_and_progress_values(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Portal"))
        .await
        .unwrap();

    let t1 = TaskRepo::create(&pool, &new_task(project.id, "Diseño", 30))
        .await
        .unwrap();
    assert_eq!(t1.estado, TaskStatus::Pending);
    TaskRepo::create(&pool, &new_task(project.id, "Backend", 90))
        .await
        .unwrap();

    let mut values = TaskRepo::progress_by_project(&pool, project.id).await.unwrap();
    values.sort_unstable();
    assert_eq!(values, vec![30, 90]);

    let patch = UpdateTask {
        estado: Some(TaskStatus::Blocked),
        ..Default::default()
    };
    let updated = TaskRepo::update(&pool, t1.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.estado, TaskStatus::Blocked);
    assert_eq!(updated.progreso, 30);

    let blocked = TaskRepo::list(
        &pool,
        &TaskFilters {
            estado: Some(TaskStatus::Blocked),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(blocked.len(), 1);

    assert!(TaskRepo::delete(&pool, t1.id).await.unwrap());
    assert!(!TaskRepo::delete(&pool, t1.id).await.unwrap());
    assert_eq!(
        TaskRepo::progress_by_project(&pool, project.id).await.unwrap(),
        vec![90]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subtask_crud_and_filters(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Portal"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Diseño", 0))
        .await
        .unwrap();

    let s1 = SubtaskRepo::create(&pool, &new_subtask(task.id, "Bocetos"))
        .await
        .unwrap();
    assert!(!s1.completada);
    SubtaskRepo::create(&pool, &new_subtask(task.id, "Paleta"))
        .await
        .unwrap();

    let done = UpdateSubtask {
        completada: Some(true),
        ..Default::default()
    };
    SubtaskRepo::update(&pool, s1.id, &done).await.unwrap().unwrap();

    let completed = SubtaskRepo::list(
        &pool,
        &SubtaskFilters {
            tarea_id: Some(task.id),
            completada: Some(true),
        },
    )
    .await
    .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, s1.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_loader_nests_every_level(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme", "Acme SA"))
        .await
        .unwrap();
    let other = ClientRepo::create(&pool, &new_client("Other", "Other"))
        .await
        .unwrap();
    let project = ProjectRepo::create(&pool, &new_project(client.id, "Portal"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Diseño", 0))
        .await
        .unwrap();
    SubtaskRepo::create(&pool, &new_subtask(task.id, "Bocetos"))
        .await
        .unwrap();

    let clients = ClientRepo::list(&pool, &ClientFilters::default()).await.unwrap();
    let details = DetailLoader::clients(&pool, clients).await.unwrap();
    assert_eq!(details.len(), 2);

    let acme = details.iter().find(|d| d.client.id == client.id).unwrap();
    assert_eq!(acme.proyectos.len(), 1);
    assert_eq!(acme.proyectos[0].tareas.len(), 1);
    assert_eq!(acme.proyectos[0].tareas[0].subtareas.len(), 1);

    let empty = details.iter().find(|d| d.client.id == other.id).unwrap();
    assert!(empty.proyectos.is_empty());
}
