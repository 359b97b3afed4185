//! Hardhat script templates
//!
//! The contract is referenced only through the [`SanitizedName`], both as
//! the `getContractFactory` key and as the local variable holding the
//! deployed instance.

use cogen_ident::SanitizedName;
use cogen_parser::ConstructorParam;

/// Placeholder JavaScript expression for one constructor argument
///
/// `deployer` is in scope in every rendered script.
#[must_use]
pub fn placeholder_arg(param: &ConstructorParam, name: &SanitizedName) -> String {
    let ty = param.ty.as_str();
    if ty.ends_with(']') {
        return "[]".to_string();
    }
    match ty {
        "address" => "deployer.address".to_string(),
        "bool" => "false".to_string(),
        "string" => format!("\"{name}\""),
        "bytes" => "\"0x\"".to_string(),
        t if t.starts_with("uint") || t.starts_with("int") => "0".to_string(),
        t if t.starts_with("bytes") => match t["bytes".len()..].parse::<u8>() {
            Ok(width @ 1..=32) => format!("\"0x{}\"", "00".repeat(usize::from(width))),
            _ => "\"0x\"".to_string(),
        },
        // Contract and interface types are passed as addresses
        _ => "ethers.ZeroAddress".to_string(),
    }
}

fn argument_list(params: &[ConstructorParam], name: &SanitizedName) -> String {
    params
        .iter()
        .map(|p| placeholder_arg(p, name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Module syntax of generated scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptSyntax {
    /// `require(...)`, for `.js` and `.cjs`
    #[default]
    CommonJs,
    /// `import ... from ...`, for `.ts` and `.mjs`
    EsModule,
}

impl ScriptSyntax {
    /// Syntax for a script extension, `None` if unsupported
    #[must_use]
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "cjs" => Some(Self::CommonJs),
            "ts" | "mjs" => Some(Self::EsModule),
            _ => None,
        }
    }

    fn import(self, binding: &str, module: &str) -> String {
        match self {
            Self::CommonJs => format!("const {{ {binding} }} = require(\"{module}\");\n"),
            Self::EsModule => format!("import {{ {binding} }} from \"{module}\";\n"),
        }
    }
}

/// Render the deployment script
#[must_use]
pub fn render_deploy_script(name: &SanitizedName, params: &[ConstructorParam], syntax: ScriptSyntax) -> String {
    let args = argument_list(params, name);
    let imports = syntax.import("ethers", "hardhat");
    format!(
        r#"// Deploys {name}. Review the constructor arguments before using a live network.
{imports}
async function main() {{
  const [deployer] = await ethers.getSigners();
  const factory = await ethers.getContractFactory("{name}");
  const {name} = await factory.deploy({args});
  await {name}.waitForDeployment();
  console.log("{name} deployed to:", await {name}.getAddress());
}}

main().catch((error) => {{
  console.error(error);
  process.exitCode = 1;
}});
"#
    )
}

/// Render the mocha/chai test stub
#[must_use]
pub fn render_test_stub(name: &SanitizedName, params: &[ConstructorParam], syntax: ScriptSyntax) -> String {
    let args = argument_list(params, name);
    let imports = syntax.import("expect", "chai") + &syntax.import("ethers", "hardhat");
    format!(
        r#"{imports}
describe("{name}", function () {{
  it("deploys", async function () {{
    const [deployer] = await ethers.getSigners();
    const factory = await ethers.getContractFactory("{name}");
    const {name} = await factory.deploy({args});
    await {name}.waitForDeployment();
    expect(await {name}.getAddress()).to.be.properAddress;
  }});
}});
"#
    )
}
