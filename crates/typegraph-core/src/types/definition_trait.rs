use crate::DirectiveAnnotation;
use crate::loc;

/// Accessors shared by every kind of definition that can carry directive
/// annotations (types, fields, arguments, input fields and enum values).
pub trait DefinitionTrait {
    fn def_location(&self) -> &loc::SourceLocation;
    fn description(&self) -> Option<&str>;
    fn directives(&self) -> &[DirectiveAnnotation];
    fn name(&self) -> &str;
}
