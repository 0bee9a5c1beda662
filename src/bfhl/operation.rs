use std::fmt;

use num_bigint::BigInt;

/// The closed set of operations a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Fibonacci,
        Operation::Prime,
        Operation::Lcm,
        Operation::Hcf,
        Operation::Ai,
    ];

    /// Wire key. Case-sensitive; `AI` is upper-case on purpose.
    pub fn key(self) -> &'static str {
        match self {
            Operation::Fibonacci => "fibonacci",
            Operation::Prime => "prime",
            Operation::Lcm => "lcm",
            Operation::Hcf => "hcf",
            Operation::Ai => "AI",
        }
    }

    pub fn from_key(key: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }

    /// `"fibonacci, prime, lcm, hcf, AI"`
    pub fn allowed_keys() -> String {
        Self::ALL.map(Operation::key).join(", ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A request whose value has passed its operation's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BfhlRequest {
    Fibonacci(u32),
    Prime(Vec<BigInt>),
    Lcm(Vec<BigInt>),
    Hcf(Vec<BigInt>),
    /// Already trimmed.
    Ai(String),
}

impl BfhlRequest {
    pub fn operation(&self) -> Operation {
        match self {
            BfhlRequest::Fibonacci(_) => Operation::Fibonacci,
            BfhlRequest::Prime(_) => Operation::Prime,
            BfhlRequest::Lcm(_) => Operation::Lcm,
            BfhlRequest::Hcf(_) => Operation::Hcf,
            BfhlRequest::Ai(_) => Operation::Ai,
        }
    }
}
