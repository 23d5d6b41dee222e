//! 트럭 + 트레일러 투자의 현금흐름, 대출 상환, 세액공제 계산을 모아둔다.
//! 모든 함수는 입력 값만으로 결과를 만드는 순수 함수다.

pub mod amortization;
pub mod better_client;
pub mod cashflow;
pub mod fiscal_credit;
pub mod input;

pub use amortization::{installment, schedule, summarize, AmortizationRow, LoanSummary};
pub use better_client::apply_better_client;
pub use cashflow::{capital_structure, compute, compute_with_credit, CapitalStructure, CashflowResult};
pub use fiscal_credit::{fiscal_credit, FiscalCredit};
pub use input::{BetterClient, BetterClientMode, InputError, InputModel, MAX_TERM_MONTHS};
