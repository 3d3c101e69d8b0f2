use serde::{Deserialize, Serialize};

use crate::model::assignment::Assignment;
use crate::model::professor_state::AssignationRecord;

/// One subject-block line inside a professor's persisted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfessorAsignaturaReport {
    pub nombre: String,
    pub sala: String,
    pub bloque: u8,
    pub dia: String,
    pub satisfaccion: u8,
    pub codigo_asignatura: String,
    pub instance: String,
    pub actividad: crate::model::Activity,
}

/// A professor's full persisted record: `Horarios_asignados.json` is an
/// array of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfessorReport {
    pub nombre: String,
    pub asignaturas: Vec<ProfessorAsignaturaReport>,
    pub solicitudes: u32,
    pub asignaturas_completadas: u32,
}

impl ProfessorReport {
    pub fn new(nombre: impl Into<String>, assignments: &[AssignationRecord], solicitudes: u32) -> Self {
        let asignaturas: Vec<_> = assignments
            .iter()
            .map(|record| ProfessorAsignaturaReport {
                nombre: record.subject_name.clone(),
                sala: record.room_code.clone(),
                bloque: record.block,
                dia: format!("{:?}", record.day),
                satisfaccion: record.satisfaction,
                codigo_asignatura: record.subject_code.clone(),
                instance: record.instance_key.clone(),
                actividad: record.activity,
            })
            .collect();
        let asignaturas_completadas = asignaturas.len() as u32;
        Self { nombre: nombre.into(), asignaturas, solicitudes, asignaturas_completadas }
    }
}

/// One booking line inside a room's persisted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomAsignaturaReport {
    pub nombre: String,
    pub capacidad: u32,
    pub bloque: u8,
    pub dia: String,
    pub satisfaccion: u8,
}

/// A room's full persisted record: `Horarios_salas.json` is an array of
/// these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomReport {
    pub codigo: String,
    pub campus: String,
    pub asignaturas: Vec<RoomAsignaturaReport>,
}

impl RoomReport {
    pub fn new(codigo: impl Into<String>, campus: impl Into<String>, assignments: &[Assignment]) -> Self {
        let asignaturas = assignments
            .iter()
            .map(|assignment| RoomAsignaturaReport {
                nombre: assignment.subject_name.clone(),
                capacidad: assignment.enrollment,
                bloque: assignment.block,
                dia: format!("{:?}", assignment.day),
                satisfaccion: assignment.satisfaction,
            })
            .collect();
        Self { codigo: codigo.into(), campus: campus.into(), asignaturas }
    }
}
