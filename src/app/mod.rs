// Application layer: concrete pipelines built on the domain ports.

pub mod pipelines;
