mod extension_merger_tests;
mod type_definition_builder_tests;
mod type_reference_registry_tests;
