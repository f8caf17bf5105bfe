//! Code Emitter: renders `predict` functions in the target language

use log::warn;

use super::builder::{ExpressionBuilder, Local};
use super::expr::{Expr, Predicate};
use super::identifiers::safe_identifiers;
use super::Language;
use crate::constants::codegen::{JAVA_CLASS, JAVA_PACKAGE, NT_TABLE};
use crate::model::{Activation, Model, NeuralNetwork};

/// Deployment target advertised in smart-library output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hardware {
    #[default]
    Cpu,
    Gpu,
    Npu,
    RaspberryPi,
}

impl Hardware {
    pub const ALL: [Hardware; 4] = [Hardware::Cpu, Hardware::Gpu, Hardware::Npu, Hardware::RaspberryPi];

    pub fn label(&self) -> &'static str {
        match self {
            Hardware::Cpu => "CPU",
            Hardware::Gpu => "GPU",
            Hardware::Npu => "NPU",
            Hardware::RaspberryPi => "Raspberry Pi",
        }
    }

    /// Accepts the short labels and the longer menu captions, e.g. `GPU (CUDA)`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|hw| text.starts_with(hw.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmitOptions {
    pub language: Language,
    pub horner: bool,
    pub smart_libs: bool,
    pub hardware: Hardware,
    /// Team number or server address; `Some` enables the NetworkTables loop
    pub network_tables: Option<String>,
}

/// Function body before it is rendered in a concrete syntax
struct Plan {
    locals: Vec<Local>,
    body: Body,
}

impl Plan {
    fn uses_pow(&self) -> bool {
        self.body.uses_pow() || self.locals.iter().any(|local| local.value.uses_pow())
    }
}

enum Body {
    Return(Expr),
    Branch {
        guard: Predicate,
        then: Expr,
        otherwise: Expr,
    },
    Network(NeuralNetwork),
}

impl Body {
    fn uses_pow(&self) -> bool {
        match self {
            Body::Return(expr) => expr.uses_pow(),
            Body::Branch { guard, then, otherwise } => {
                guard.uses_pow() || then.uses_pow() || otherwise.uses_pow()
            }
            Body::Network(_) => false,
        }
    }
}

pub struct CodeEmitter {
    options: EmitOptions,
}

impl CodeEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Render source for one or more models; `None` if `models` is empty
    pub fn emit(&self, models: &[Model]) -> Option<String> {
        let first = models.first()?;
        let params = safe_identifiers(&first.input_names());
        let plan = self.plan(models);

        let code = match self.options.language {
            Language::Python => self.python(&params, &plan),
            Language::C => self.c(&params, &plan),
            Language::Java => self.java(&params, &plan),
        };
        Some(code)
    }

    /// Merge the model list into a single body.
    ///
    /// Two-way only: a conditioned first model guards its expression and the
    /// second model becomes the else branch, whatever its own condition.
    /// Chained sub-models are bound to locals shared by both branches.
    fn plan(&self, models: &[Model]) -> Plan {
        let builder = ExpressionBuilder::new(self.options.horner);
        let first = &models[0];
        let mut locals = Vec::new();

        if self.options.smart_libs && self.options.language == Language::Python {
            if let Some(net) = first.network() {
                return Plan { locals, body: Body::Network(net.clone()) };
            }
        }

        if let (Some(second), Some(guard)) = (models.get(1), builder.predicate(first)) {
            if models.len() > 2 {
                warn!("only two branches are merged; ignoring {} model(s)", models.len() - 2);
            }
            let then = builder.build_scoped(first, &mut locals);
            let otherwise = builder.build_scoped(second, &mut locals);
            return Plan { locals, body: Body::Branch { guard, then, otherwise } };
        }

        if models.len() > 1 {
            warn!("first model has no branch condition; ignoring {} model(s)", models.len() - 1);
        }
        let expr = builder.build_scoped(first, &mut locals);
        Plan { locals, body: Body::Return(expr) }
    }

    fn python(&self, params: &[String], plan: &Plan) -> String {
        let lang = Language::Python;
        let body = &plan.body;
        let mut lines: Vec<String> = Vec::new();

        if self.options.network_tables.is_some() {
            lines.push("import time".into());
            lines.push("import ntcore # pip install pyntcore".into());
        }
        if self.options.smart_libs {
            lines.push("import numpy as np".into());
            if matches!(body, Body::Network(_)) {
                lines.push("# Hardware Acceleration Options".into());
                match self.options.hardware {
                    Hardware::Gpu => {
                        lines.push("import onnxruntime as ort # pip install onnxruntime-gpu".into());
                        lines.push("providers = ['CUDAExecutionProvider', 'CPUExecutionProvider']".into());
                    }
                    Hardware::Npu => {
                        lines.push("import openvino.runtime as ov # pip install openvino".into());
                        lines.push("# optimized for Intel/NPU".into());
                    }
                    Hardware::Cpu | Hardware::RaspberryPi => {
                        lines.push("# Running on standard CPU".into());
                    }
                }
            }
        }
        lines.push(String::new());
        lines.push(format!("def predict({}):", params.join(", ")));
        for local in &plan.locals {
            lines.push(format!("    {} = {}", local.name, local.value.render(lang)));
        }

        match body {
            Body::Return(expr) => lines.push(format!("    return {}", expr.render(lang))),
            Body::Branch { guard, then, otherwise } => {
                lines.push(format!("    if {}:", guard.render(lang)));
                lines.push(format!("        return {}", then.render(lang)));
                lines.push("    else:".into());
                lines.push(format!("        return {}", otherwise.render(lang)));
            }
            Body::Network(net) => self.numpy_forward_pass(params, net, &mut lines),
        }

        if let Some(team) = &self.options.network_tables {
            lines.push(String::new());
            lines.push("def run_network_tables():".into());
            lines.push("    inst = ntcore.NetworkTableInstance.getDefault()".into());
            lines.push("    inst.startClient4('FlibberGen Client')".into());
            if team.contains('.') {
                lines.push(format!("    inst.setServer('{}')", team));
            } else {
                let team = if team.trim().is_empty() { "0" } else { team.trim() };
                lines.push(format!("    inst.setServerTeam({})", team));
            }
            lines.push("    inst.startDSClient()".into());
            lines.push(String::new());
            lines.push(format!("    table = inst.getTable('{}')", NT_TABLE));
            lines.push("    # Subs".into());
            for name in params {
                lines.push(format!("    sub_{0} = table.getDoubleTopic('{0}').subscribe(0.0)", name));
            }
            lines.push("    # Pubs".into());
            lines.push("    pub_res = table.getDoubleTopic('Result').publish()".into());
            lines.push(String::new());
            lines.push("    while True:".into());
            let reads: Vec<String> = params.iter().map(|n| format!("sub_{}.get()", n)).collect();
            lines.push("        try:".into());
            lines.push(format!("            result = predict({})", reads.join(", ")));
            lines.push("            pub_res.set(result)".into());
            lines.push("        except Exception as e: print(e)".into());
            lines.push("        time.sleep(0.02) # 50Hz".into());
            lines.push(String::new());
            lines.push("if __name__ == '__main__':".into());
            lines.push("    run_network_tables()".into());
        }

        lines.join("\n")
    }

    /// Embedded-weights inference with an identity output layer
    fn numpy_forward_pass(&self, params: &[String], net: &NeuralNetwork, lines: &mut Vec<String>) {
        lines.push(format!(
            "    # Smart Inference using NumPy (Target: {})",
            self.options.hardware.label()
        ));
        lines.push(format!("    h = np.array([{}])", params.join(", ")));

        let last = net.layers.len().saturating_sub(1);
        for (i, layer) in net.layers.iter().enumerate() {
            let rows: Vec<String> = layer.weights.iter().map(|row| number_list(row)).collect();
            lines.push(format!("    # Layer {}: ({}, {})", i, layer.inputs(), layer.units()));
            lines.push(format!("    W{} = np.array([{}])", i, rows.join(", ")));
            lines.push(format!("    b{} = np.array({})", i, number_list(&layer.biases)));
            let z = format!("h @ W{0} + b{0}", i);
            if i == last {
                lines.push(format!("    h = {}", z));
            } else {
                lines.push(format!("    h = {}", numpy_activation(net.activation, &z)));
            }
        }
        lines.push("    return float(h[0])".into());
    }

    fn c(&self, params: &[String], plan: &Plan) -> String {
        let lang = Language::C;
        let mut lines: Vec<String> = Vec::new();

        if plan.uses_pow() {
            lines.push("#include <math.h>".into());
            lines.push(String::new());
        }
        lines.push(format!("double predict({}) {{", typed_params(params)));
        push_braced_body(lang, plan, "    ", &mut lines);
        lines.push("}".into());

        lines.join("\n")
    }

    fn java(&self, params: &[String], plan: &Plan) -> String {
        let lang = Language::Java;
        let mut lines: Vec<String> = vec![format!("package {};", JAVA_PACKAGE)];

        if self.options.network_tables.is_some() {
            lines.push("import edu.wpi.first.networktables.*;".into());
        }
        lines.push(String::new());
        lines.push(format!("public class {} {{", JAVA_CLASS));
        lines.push(format!("    public static double predict({}) {{", typed_params(params)));
        push_braced_body(lang, plan, "        ", &mut lines);
        lines.push("    }".into());

        if self.options.network_tables.is_some() {
            lines.push(String::new());
            lines.push("    // NetworkTables Boilerplate".into());
            lines.push("    NetworkTableInstance inst = NetworkTableInstance.getDefault();".into());
            lines.push(format!("    NetworkTable table = inst.getTable(\"{}\");", NT_TABLE));
            for name in params {
                lines.push(format!(
                    "    DoubleSubscriber sub_{0} = table.getDoubleTopic(\"{0}\").subscribe(0.0);",
                    name
                ));
            }
            lines.push("    DoublePublisher pub_res = table.getDoubleTopic(\"Result\").publish();".into());
            lines.push(String::new());
            lines.push("    public void periodic() {".into());
            let reads: Vec<String> = params.iter().map(|n| format!("sub_{}.get()", n)).collect();
            lines.push(format!("        double res = predict({});", reads.join(", ")));
            lines.push("        pub_res.set(res);".into());
            lines.push("    }".into());
        }

        lines.push("}".into());
        lines.join("\n")
    }
}

/// Statement body shared by the brace languages
fn push_braced_body(lang: Language, plan: &Plan, indent: &str, lines: &mut Vec<String>) {
    for local in &plan.locals {
        lines.push(format!("{}double {} = {};", indent, local.name, local.value.render(lang)));
    }
    match &plan.body {
        Body::Return(expr) => lines.push(format!("{}return {};", indent, expr.render(lang))),
        Body::Branch { guard, then, otherwise } => {
            lines.push(format!("{}if ({}) {{", indent, guard.render(lang)));
            lines.push(format!("{}    return {};", indent, then.render(lang)));
            lines.push(format!("{}}} else {{", indent));
            lines.push(format!("{}    return {};", indent, otherwise.render(lang)));
            lines.push(format!("{}}}", indent));
        }
        // Only planned for Python
        Body::Network(_) => lines.push(format!("{}return 0;", indent)),
    }
}

fn typed_params(params: &[String]) -> String {
    params
        .iter()
        .map(|p| format!("double {}", p))
        .collect::<Vec<_>>()
        .join(", ")
}

fn number_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| Expr::Const(*v).render(Language::Python)).collect();
    format!("[{}]", items.join(", "))
}

fn numpy_activation(activation: Activation, z: &str) -> String {
    match activation {
        Activation::Relu => format!("np.maximum({}, 0.0)", z),
        Activation::Tanh => format!("np.tanh({})", z),
        Activation::Logistic => format!("1.0 / (1.0 + np.exp(-({})))", z),
        Activation::Identity => z.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::codegen::SUB_MODEL_COLUMN;
    use crate::model::{ComparisonOp, Condition, DenseLayer, ModelInfo, Polynomial};

    fn model_on(names: &[&str], coeffs: Vec<f64>, intercept: f64) -> Model {
        let info = ModelInfo {
            input_feature_names: names.iter().map(|s| s.to_string()).collect(),
            ..ModelInfo::default()
        };
        Model::polynomial(Polynomial::univariate(intercept, coeffs), info)
    }

    fn options(language: Language) -> EmitOptions {
        EmitOptions { language, ..EmitOptions::default() }
    }

    #[test]
    fn test_empty_model_list() {
        assert_eq!(CodeEmitter::new(options(Language::C)).emit(&[]), None);
    }

    #[test]
    fn test_python_single_model() {
        let code = CodeEmitter::new(options(Language::Python))
            .emit(&[model_on(&["speed"], vec![2.0, 3.0], 1.0)])
            .unwrap();
        assert_eq!(
            code,
            "\ndef predict(speed):\n    return 1.000000 + (2.000000 * speed) + (3.000000 * speed**2)"
        );
    }

    #[test]
    fn test_c_includes_math_only_for_pow() {
        let emitter = CodeEmitter::new(options(Language::C));
        let code = emitter.emit(&[model_on(&["2x"], vec![2.0, 3.0], 1.0)]).unwrap();
        assert_eq!(
            code,
            "#include <math.h>\n\ndouble predict(double v_2x) {\n    return 1.000000 + (2.000000 * v_2x) + (3.000000 * pow(v_2x, 2));\n}"
        );

        let horner = CodeEmitter::new(EmitOptions { horner: true, ..options(Language::C) })
            .emit(&[model_on(&["x"], vec![2.0, 3.0], 1.0)])
            .unwrap();
        assert_eq!(
            horner,
            "double predict(double x) {\n    return (1.000000 + x * (2.000000 + x * 3.000000));\n}"
        );
    }

    #[test]
    fn test_java_wrapper() {
        let code = CodeEmitter::new(options(Language::Java))
            .emit(&[model_on(&["x"], vec![1.0], 0.0)])
            .unwrap();
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(lines[0], "package frc.robot.generated;");
        assert_eq!(lines[2], "public class FlibberModel {");
        assert_eq!(lines[3], "    public static double predict(double x) {");
        assert_eq!(lines[4], "        return 0.000000 + (1.000000 * x);");
        assert_eq!(lines[5], "    }");
        assert_eq!(lines[6], "}");
    }

    fn branches() -> Vec<Model> {
        let mut high = model_on(&["v"], vec![2.0], 0.0);
        high.info.condition = Some(Condition::new("v", ComparisonOp::Greater, 3.0));
        let mut low = model_on(&["v"], vec![1.0], 1.0);
        low.info.condition = Some(Condition::new("v", ComparisonOp::Greater, 3.0).negate());
        vec![high, low]
    }

    #[test]
    fn test_conditional_merge_python() {
        let code = CodeEmitter::new(options(Language::Python)).emit(&branches()).unwrap();
        assert!(code.contains(
            "    if v > 3.000000:\n        return 0.000000 + (2.000000 * v)\n    else:\n        return 1.000000 + (1.000000 * v)"
        ));
    }

    #[test]
    fn test_conditional_merge_c() {
        let code = CodeEmitter::new(options(Language::C)).emit(&branches()).unwrap();
        assert_eq!(
            code,
            "double predict(double v) {\n    if (v > 3.000000) {\n        return 0.000000 + (2.000000 * v);\n    } else {\n        return 1.000000 + (1.000000 * v);\n    }\n}"
        );
    }

    #[test]
    fn test_conditional_merge_java() {
        let code = CodeEmitter::new(options(Language::Java)).emit(&branches()).unwrap();
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(
            lines[3..10],
            [
                "    public static double predict(double v) {",
                "        if (v > 3.000000) {",
                "            return 0.000000 + (2.000000 * v);",
                "        } else {",
                "            return 1.000000 + (1.000000 * v);",
                "        }",
                "    }",
            ]
        );
    }

    fn chained() -> Model {
        let sub = model_on(&["b"], vec![2.0], 1.0);
        let info = ModelInfo {
            input_feature_names: vec![SUB_MODEL_COLUMN.into()],
            all_input_names: vec!["b".into()],
            sub_model: Some(Box::new(sub)),
            sub_model_input_names: vec!["b".into()],
            ..ModelInfo::default()
        };
        Model::polynomial(Polynomial::univariate(0.0, vec![1.0, 3.0]), info)
    }

    #[test]
    fn test_sub_model_bound_to_local() {
        let opts = EmitOptions { horner: true, ..options(Language::Python) };
        let code = CodeEmitter::new(opts).emit(&[chained()]).unwrap();
        assert_eq!(
            code,
            "\ndef predict(b):\n    _sub0 = (1.000000 + b * 2.000000)\n    return (0.000000 + _sub0 * (1.000000 + _sub0 * 3.000000))"
        );

        let code = CodeEmitter::new(options(Language::C)).emit(&[chained()]).unwrap();
        assert_eq!(
            code,
            "#include <math.h>\n\ndouble predict(double b) {\n    double _sub0 = 1.000000 + (2.000000 * b);\n    return 0.000000 + (1.000000 * _sub0) + (3.000000 * pow(_sub0, 2));\n}"
        );
    }

    #[test]
    fn test_unconditioned_first_model_wins() {
        let models = vec![model_on(&["v"], vec![2.0], 0.0), model_on(&["v"], vec![9.0], 0.0)];
        let code = CodeEmitter::new(options(Language::Python)).emit(&models).unwrap();
        assert!(code.contains("return 0.000000 + (2.000000 * v)"));
        assert!(!code.contains("9.000000"));
    }

    #[test]
    fn test_python_network_tables() {
        let opts = EmitOptions {
            network_tables: Some("1234".into()),
            ..options(Language::Python)
        };
        let code = CodeEmitter::new(opts).emit(&[model_on(&["a"], vec![1.0], 0.0)]).unwrap();
        assert!(code.starts_with("import time\nimport ntcore"));
        assert!(code.contains("    inst.setServerTeam(1234)"));
        assert!(code.contains("    sub_a = table.getDoubleTopic('a').subscribe(0.0)"));
        assert!(code.contains("            result = predict(sub_a.get())"));

        let opts = EmitOptions {
            network_tables: Some("10.12.34.2".into()),
            ..options(Language::Python)
        };
        let code = CodeEmitter::new(opts).emit(&[model_on(&["a"], vec![1.0], 0.0)]).unwrap();
        assert!(code.contains("    inst.setServer('10.12.34.2')"));
    }

    #[test]
    fn test_java_network_tables() {
        let opts = EmitOptions {
            network_tables: Some(String::new()),
            ..options(Language::Java)
        };
        let code = CodeEmitter::new(opts).emit(&[model_on(&["a"], vec![1.0], 0.0)]).unwrap();
        assert!(code.contains("import edu.wpi.first.networktables.*;"));
        assert!(code.contains("    public void periodic() {"));
        assert!(code.contains("        double res = predict(sub_a.get());"));
        assert!(code.ends_with("    }\n}"));
    }

    #[test]
    fn test_smart_network_forward_pass() {
        let net = NeuralNetwork::new(
            vec![
                DenseLayer { weights: vec![vec![1.0, -1.0]], biases: vec![0.0, 0.5] },
                DenseLayer { weights: vec![vec![2.0], vec![1.0]], biases: vec![0.0] },
            ],
            Activation::Relu,
        )
        .unwrap();
        let info = ModelInfo { input_feature_names: vec!["a".into()], ..ModelInfo::default() };
        let model = Model::neural(net, info);

        let opts = EmitOptions {
            smart_libs: true,
            hardware: Hardware::Gpu,
            ..options(Language::Python)
        };
        let code = CodeEmitter::new(opts).emit(&[model.clone()]).unwrap();
        assert!(code.contains("import onnxruntime as ort"));
        assert!(code.contains("    W0 = np.array([[1.000000, -1.000000]])"));
        assert!(code.contains("    h = np.maximum(h @ W0 + b0, 0.0)"));
        assert!(code.contains("    h = h @ W1 + b1"));
        assert!(code.ends_with("    return float(h[0])"));

        // Without smart libs a network has no closed form
        let plain = CodeEmitter::new(options(Language::Python)).emit(&[model]).unwrap();
        assert!(plain.ends_with("    return 0"));
    }

    #[test]
    fn test_hardware_parse() {
        assert_eq!(Hardware::parse("GPU (CUDA)"), Some(Hardware::Gpu));
        assert_eq!(Hardware::parse("Raspberry Pi"), Some(Hardware::RaspberryPi));
        assert_eq!(Hardware::parse("TPU"), None);
    }
}
