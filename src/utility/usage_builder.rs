
use nonempty::NonEmpty;
use strum_macros::{Display, EnumIter};


#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Moderation,
    Fun,
    Games,
}

enum ParameterType {
    Constant,
    Required,
    Optional,
}

struct Parameter {
    name: String,
    param_type: ParameterType,
}

pub struct UsageBuilder {
    pub command_type: CommandType,
    pub triggers: NonEmpty<String>,
    parameters: Vec<Parameter>,
    example: Option<String>,
}

impl UsageBuilder {

    pub fn new(command_type: CommandType, triggers: NonEmpty<String>) -> UsageBuilder {
        UsageBuilder {
            command_type,
            triggers,
            parameters: Vec::new(),
            example: None,
        }
    }

    fn add_parameter(mut self, name: &str, param_type: ParameterType) -> Self {
        self.parameters.push(Parameter { name: name.to_string(), param_type });
        self
    }

    pub fn add_constant(self, name: &str) -> Self {
        self.add_parameter(name, ParameterType::Constant)
    }

    pub fn add_required(self, name: &str) -> Self {
        self.add_parameter(name, ParameterType::Required)
    }

    pub fn add_optional(self, name: &str) -> Self {
        self.add_parameter(name, ParameterType::Optional)
    }

    pub fn example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    pub fn build(&self, prefix: &str) -> String {
        let mut usage = format!("`{}{}", prefix, self.triggers.head);
        for parameter in self.parameters.iter() {
            match parameter.param_type {
                ParameterType::Constant => usage.push_str(&format!(" {}", parameter.name)),
                ParameterType::Required => usage.push_str(&format!(" <{}>", parameter.name)),
                ParameterType::Optional => usage.push_str(&format!(" [{}]", parameter.name)),
            }
        }
        usage.push('`');

        if let Some(example) = &self.example {
            usage.push_str(&format!("\nExample: `{}{} {}`", prefix, self.triggers.head, example));
        }
        if !self.triggers.tail.is_empty() {
            usage.push_str(&format!("\nAlternative names: {}", self.triggers.tail.join(", ")));
        }
        usage
    }

}
