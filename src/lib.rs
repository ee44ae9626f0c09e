//! Dashboard de estanterías: sube una imagen a un modelo de detección alojado
//! en Roboflow y resume las predicciones (filas, clases, reparto por producto).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
