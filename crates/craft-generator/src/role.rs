//! Generator roles and their fixed system instructions.
//!
//! Each pipeline stage talks to the generator in one role. The instruction
//! fixes the output shape the stage parser expects: markdown for the DOU, a
//! JSON array of the stage's records for RTM, scenarios and test cases, and
//! bare TypeScript for the automated test.

use std::fmt;

use craft_core::enums::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Writes the Document of Understanding from raw assets.
    Analyst,
    /// Builds the requirements traceability matrix from an approved DOU.
    Architect,
    /// Writes test scenarios for one RTM item.
    ScenarioEngineer,
    /// Writes detailed test cases for one scenario.
    CaseEngineer,
    /// Writes a Playwright test for one test case.
    AutomationEngineer,
}

const ANALYST: &str = "You are an expert Business Analyst.
Analyze the raw requirements below and write a Document of Understanding (DOU).

Use exactly this Markdown outline:
# Executive Summary
# Functional Requirements
# Non-Functional Requirements
# Assumptions & Risks

Requirements:";

const ARCHITECT: &str = "You are a Senior System Architect.
Build a Requirements Traceability Matrix (RTM) from the approved DOU below.

Return ONLY a valid JSON array of objects shaped like:
[
  { \"reqId\": \"REQ-001\", \"description\": \"...\" }
]

DOU Context:";

const SCENARIO_ENGINEER: &str = "You are a Lead QA Engineer.
Write Test Scenarios covering the RTM item below.

Return ONLY a valid JSON array of objects shaped like:
[
  { \"title\": \"Verify Login with Valid Credentials\", \"steps\": \"1. Go to Login... 2. Enter...\" }
]

RTM Item:";

const CASE_ENGINEER: &str = "You are a Senior QA Automation Engineer.
Write detailed Test Cases for the Test Scenario below.

Return ONLY a valid JSON array of objects shaped like:
[
  {
    \"title\": \"Positive Login Flow\",
    \"preconditions\": \"User is registered\",
    \"steps\": \"1. Navigate to /login...\",
    \"expectedResult\": \"Redirect to dashboard\"
  }
]

Scenario Context:";

const AUTOMATION_ENGINEER: &str = "You are an expert Playwright Automation Engineer using TypeScript.
Write a self-contained Playwright test script for the Test Case below.

Return ONLY the raw TypeScript code, without markdown fencing or explanation.
Assume a standard Playwright setup.

Test Case:";

impl Role {
    /// The role that serves a pipeline stage.
    #[must_use]
    pub const fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Dou => Self::Analyst,
            Stage::Rtm => Self::Architect,
            Stage::Scenarios => Self::ScenarioEngineer,
            Stage::TestCases => Self::CaseEngineer,
            Stage::AutomatedTest => Self::AutomationEngineer,
        }
    }

    /// System instruction sent ahead of the stage context.
    #[must_use]
    pub const fn instructions(self) -> &'static str {
        match self {
            Self::Analyst => ANALYST,
            Self::Architect => ARCHITECT,
            Self::ScenarioEngineer => SCENARIO_ENGINEER,
            Self::CaseEngineer => CASE_ENGINEER,
            Self::AutomationEngineer => AUTOMATION_ENGINEER,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::Architect => "architect",
            Self::ScenarioEngineer => "scenario_engineer",
            Self::CaseEngineer => "case_engineer",
            Self::AutomationEngineer => "automation_engineer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
