//! The built-in digital-twin crew: four fixed agent roles and the task
//! sequence that recreates a host's network in Docker.

use super::{Action, AgentSpec, CrewConfig, ProcessKind, TaskSpec, ToolKind};

/// Kickoff topic a pipeline run is labelled with when no override is given.
pub const DEFAULT_TOPIC: &str = "Digital Twin Network Recreation";

/// Returns the built-in crew. Only the collect task carries host-executable
/// actions; the remaining tasks describe reasoning work owned by an agent
/// backend.
pub fn digital_twin() -> CrewConfig {
    CrewConfig {
        process: ProcessKind::Sequential,
        agents: vec![
            AgentSpec {
                name: "operator".to_string(),
                role: "Network and Host Information Collector".to_string(),
                goal: "Execute commands to gather network and host information for a digital twin"
                    .to_string(),
                backstory: "You are skilled in using various command-line tools to collect \
                            network and host information efficiently."
                    .to_string(),
                verbose: true,
                memory: true,
                tools: vec![ToolKind::WebSearch],
                human_in_the_loop: false,
            },
            AgentSpec {
                name: "technical_director".to_string(),
                role: "Technical Director and Human Proxy".to_string(),
                goal: "Serve as the team leader and decompose complex tasks for delegation"
                    .to_string(),
                backstory: "You have expertise in leading technical projects and are proficient \
                            in breaking down complex tasks for efficient execution."
                    .to_string(),
                verbose: true,
                memory: true,
                tools: vec![ToolKind::WebSearch],
                human_in_the_loop: true,
            },
            AgentSpec {
                name: "docker_expert".to_string(),
                role: "Docker Network Recreator".to_string(),
                goal: "Recreate the target network in Docker using the collected data".to_string(),
                backstory: "You have extensive experience in using Docker to create and manage \
                            containerized networks."
                    .to_string(),
                verbose: true,
                memory: true,
                tools: vec![ToolKind::WebSearch],
                human_in_the_loop: false,
            },
            AgentSpec {
                name: "critic".to_string(),
                role: "Task Critic".to_string(),
                goal: "Review and provide feedback on the tasks to ensure accuracy and efficiency"
                    .to_string(),
                backstory: "You have a keen eye for detail and are proficient in analyzing tasks \
                            to improve their execution."
                    .to_string(),
                verbose: true,
                memory: true,
                tools: vec![ToolKind::WebSearch],
                human_in_the_loop: false,
            },
        ],
        tasks: vec![
            TaskSpec {
                name: "collect_network_info".to_string(),
                description: "Execute commands to gather network and host information. Use tools \
                              like `ifconfig`, `netstat`, and `hostname` to collect the \
                              necessary data."
                    .to_string(),
                expected_output: "A detailed report containing the network configuration and \
                                  host information."
                    .to_string(),
                agent: "operator".to_string(),
                tools: vec![ToolKind::WebSearch],
                actions: vec![
                    Action {
                        command: "ifconfig".to_string(),
                        log_output: true,
                    },
                    Action {
                        command: "netstat".to_string(),
                        log_output: true,
                    },
                    Action {
                        command: "hostname".to_string(),
                        log_output: true,
                    },
                ],
            },
            TaskSpec {
                name: "decompose_tasks".to_string(),
                description: "Decompose the complex task of recreating the network in Docker \
                              into smaller, manageable tasks and delegate them accordingly."
                    .to_string(),
                expected_output: "A set of clearly defined tasks for recreating the network in \
                                  Docker."
                    .to_string(),
                agent: "technical_director".to_string(),
                tools: vec![ToolKind::WebSearch],
                actions: Vec::new(),
            },
            TaskSpec {
                name: "recreate_network_docker".to_string(),
                description: "Use the collected network and host information to recreate the \
                              target network in Docker. Ensure that all configurations are \
                              accurately replicated."
                    .to_string(),
                expected_output: "A Docker Compose file and any necessary scripts to recreate \
                                  the network."
                    .to_string(),
                agent: "docker_expert".to_string(),
                tools: vec![ToolKind::WebSearch],
                actions: Vec::new(),
            },
            TaskSpec {
                name: "review_and_critique".to_string(),
                description: "Review the tasks and provide feedback to ensure accuracy and \
                              efficiency. Help the agents think through any challenges they face."
                    .to_string(),
                expected_output: "A report with feedback and suggestions for improvement."
                    .to_string(),
                agent: "critic".to_string(),
                tools: vec![ToolKind::WebSearch],
                actions: Vec::new(),
            },
        ],
    }
}
