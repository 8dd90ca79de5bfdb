//! Solidity ABI interfaces of the gated account.

use alloy_sol_types::sol;

sol! {
    interface IERC725Y {
        function getData(bytes32 dataKey) external view returns (bytes memory dataValue);
        function setData(bytes32 dataKey, bytes memory dataValue) external payable;
    }

    interface IERC725X {
        function execute(uint256 operationType, address target, uint256 value, bytes memory data)
            external
            payable
            returns (bytes memory);
    }

    interface IOwnable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }

    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes memory signature)
            external
            view
            returns (bytes4 magicValue);
    }
}
