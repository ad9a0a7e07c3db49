pub mod a001_resource_catalog;
